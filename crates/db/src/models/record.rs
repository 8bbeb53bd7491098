//! Record entity model and DTOs.

use georecord_core::types::{DbId, RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `records` table, as returned by Get, Create and Update.
///
/// Coordinates are LV95 (EPSG:2056) metres rounded to two decimals.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub type_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_id: Option<i32>,
    pub external_ref: Option<String>,
    pub build_at: Option<Timestamp>,
    pub status: Option<String>,
    pub contained_by: Option<String>,
    pub contained_by_old: Option<i32>,
    pub inactivated: bool,
    pub inactivated_time: Option<Timestamp>,
    pub inactivated_by: Option<DbId>,
    pub inactivated_reason: Option<String>,
    pub validated: bool,
    pub validated_time: Option<Timestamp>,
    pub validated_by: Option<DbId>,
    pub managed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub created_by: DbId,
    pub last_modified_at: Option<Timestamp>,
    pub last_modified_by: Option<DbId>,
    pub deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub deleted_by: Option<DbId>,
    pub more_data: Option<serde_json::Value>,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// The list-view projection used by List, Search and ListByExternalId.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RecordSummary {
    pub id: RecordId,
    pub type_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<i32>,
    pub inactivated: bool,
    pub validated: bool,
    pub status: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// Client-writable fields of a record, used by both Create and Update.
///
/// Audit columns are not part of the input: the caller's principal and the
/// database clock provide them. The `inactivated*` fields are ignored on
/// Create. `id` is ignored on Update, where the path id wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordInput {
    pub id: Option<RecordId>,
    pub type_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_id: Option<i32>,
    pub external_ref: Option<String>,
    pub build_at: Option<Timestamp>,
    pub status: Option<String>,
    pub contained_by: Option<String>,
    pub contained_by_old: Option<i32>,
    #[serde(default)]
    pub validated: bool,
    pub validated_time: Option<Timestamp>,
    pub validated_by: Option<DbId>,
    #[serde(default)]
    pub inactivated: bool,
    pub inactivated_time: Option<Timestamp>,
    pub inactivated_by: Option<DbId>,
    pub inactivated_reason: Option<String>,
    pub managed_by: Option<DbId>,
    pub more_data: Option<serde_json::Value>,
    pub pos_x: f64,
    pub pos_y: f64,
}

impl Record {
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            type_id: self.type_id,
            name: self.name.clone(),
            description: self.description.clone(),
            external_id: self.external_id,
            inactivated: self.inactivated,
            validated: self.validated,
            status: self.status.clone(),
            created_by: self.created_by,
            created_at: self.created_at,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
        }
    }
}
