//! Page bounds for list-shaped queries.

/// Default page size for record listings.
pub const DEFAULT_RECORD_LIMIT: i64 = 50;

/// Default page size for category listings.
pub const DEFAULT_CATEGORY_LIMIT: i64 = 250;

/// Upper bound for any page size.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A validated `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>, default: i64, max: i64) -> Self {
        Self {
            limit: clamp_limit(limit, default, max),
            offset: clamp_offset(offset),
        }
    }

    pub fn records(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self::new(limit, offset, DEFAULT_RECORD_LIMIT, MAX_LIST_LIMIT)
    }

    pub fn categories(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self::new(limit, offset, DEFAULT_CATEGORY_LIMIT, MAX_LIST_LIMIT)
    }
}
