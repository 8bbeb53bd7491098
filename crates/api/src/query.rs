//! Query-string parameter types for API handlers.
//!
//! Filters keep explicit presence: an omitted parameter is `None` and
//! applies no filter, while `type=0` filters on category 0.

use georecord_core::pagination::Page;
use georecord_core::search::normalize_keywords;
use georecord_core::types::DbId;
use georecord_db::models::filter::{CategoryFilter, RecordFilter};
use serde::Deserialize;

use crate::config::ServerConfig;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn records(&self, config: &ServerConfig) -> Page {
        Page::new(
            self.limit,
            self.offset,
            config.record_default_limit,
            config.max_limit,
        )
    }
}

/// `GET /records`, `/records/search`, `/records/count`, `/records/geojson`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "type")]
    pub type_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub inactivated: Option<bool>,
    pub validated: Option<bool>,
    pub keywords: Option<String>,
}

impl RecordListParams {
    pub fn page(&self, config: &ServerConfig) -> Page {
        Page::new(
            self.limit,
            self.offset,
            config.record_default_limit,
            config.max_limit,
        )
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            type_id: self.type_id,
            created_by: self.created_by,
            inactivated: self.inactivated,
            validated: self.validated,
            keywords: normalize_keywords(self.keywords.clone()),
        }
    }
}

/// `GET /categories`, `/categories/count`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub keywords: Option<String>,
    pub created_by: Option<DbId>,
    pub external_id: Option<i32>,
    pub inactivated: Option<bool>,
}

impl CategoryListParams {
    pub fn page(&self, config: &ServerConfig) -> Page {
        Page::new(
            self.limit,
            self.offset,
            config.category_default_limit,
            config.max_limit,
        )
    }

    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter {
            keywords: normalize_keywords(self.keywords.clone()),
            created_by: self.created_by,
            external_id: self.external_id,
            inactivated: self.inactivated,
        }
    }
}
