//! Category entity model and DTOs.

use georecord_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_id: Option<i32>,
    pub table_name: Option<String>,
    pub geometry_type: Option<String>,
    pub inactivated: bool,
    pub inactivated_time: Option<Timestamp>,
    pub inactivated_by: Option<DbId>,
    pub inactivated_reason: Option<String>,
    pub managed_by: Option<DbId>,
    pub icon_path: Option<String>,
    pub more_data_schema: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub created_by: DbId,
    pub last_modified_at: Option<Timestamp>,
    pub last_modified_by: Option<DbId>,
    pub deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub deleted_by: Option<DbId>,
}

/// List-view projection of a category.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<i32>,
    pub table_name: Option<String>,
    pub geometry_type: Option<String>,
    pub inactivated: bool,
    pub managed_by: Option<DbId>,
    pub icon_path: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// Client-writable fields of a category. The `inactivated*` fields are
/// ignored on Create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_id: Option<i32>,
    pub table_name: Option<String>,
    pub geometry_type: Option<String>,
    #[serde(default)]
    pub inactivated: bool,
    pub inactivated_time: Option<Timestamp>,
    pub inactivated_by: Option<DbId>,
    pub inactivated_reason: Option<String>,
    pub managed_by: Option<DbId>,
    pub icon_path: Option<String>,
    pub more_data_schema: Option<serde_json::Value>,
}

impl Category {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            external_id: self.external_id,
            table_name: self.table_name.clone(),
            geometry_type: self.geometry_type.clone(),
            inactivated: self.inactivated,
            managed_by: self.managed_by,
            icon_path: self.icon_path.clone(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}
