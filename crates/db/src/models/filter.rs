//! Optional filter grammars for list-shaped queries.
//!
//! Every field is optional. `None` means "no filter on this column"; a
//! present value, including `0` or `false`, is always a real filter.

use georecord_core::types::DbId;

/// Filters accepted by record List, Search, Count and GeoJSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub type_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub inactivated: Option<bool>,
    pub validated: Option<bool>,
    /// French full-text keywords. Ignored by List and GeoJSON.
    pub keywords: Option<String>,
}

/// Filters accepted by category List and Count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub keywords: Option<String>,
    pub created_by: Option<DbId>,
    pub external_id: Option<i32>,
    pub inactivated: Option<bool>,
}

impl RecordFilter {
    /// The same filter with the keyword predicate removed.
    pub fn without_keywords(&self) -> Self {
        Self {
            keywords: None,
            ..self.clone()
        }
    }
}
