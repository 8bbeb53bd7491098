//! Full-text search settings.

/// PostgreSQL text search configuration used for every `tsvector`/`tsquery`.
pub const SEARCH_CONFIG: &str = "french";

/// Normalize a keyword parameter.
///
/// Blank input means "no keyword filter", so it collapses to `None`.
pub fn normalize_keywords(keywords: Option<String>) -> Option<String> {
    keywords
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}
