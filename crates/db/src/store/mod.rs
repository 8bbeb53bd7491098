//! Storage seams between the service layer and the database.
//!
//! [`pg::PgStore`] is the production implementation; tests substitute an
//! in-memory one.

pub mod pg;

use async_trait::async_trait;
use georecord_core::pagination::Page;
use georecord_core::types::DbId;

use crate::entity::Entity;
use crate::models::filter::RecordFilter;
use crate::models::record::RecordSummary;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The query matched nothing. List-shaped queries report an empty result
    /// the same way.
    #[error("no rows in result set")]
    NoRows,

    #[error("duplicate key")]
    Duplicate,

    /// A write statement changed zero rows.
    #[error("write affected no rows")]
    NothingAffected,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NoRows,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Self::Duplicate
            }
            _ => Self::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Turn an empty result set into [`StoreError::NoRows`].
pub fn non_empty<T>(rows: Vec<T>) -> StoreResult<Vec<T>> {
    if rows.is_empty() {
        Err(StoreError::NoRows)
    } else {
        Ok(rows)
    }
}

/// CRUD over one entity type. Soft-deleted rows are invisible to every
/// method, including `exists` and `is_owner`.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn list(&self, filter: &E::Filter, page: Page) -> StoreResult<Vec<E::Summary>>;

    async fn count(&self, filter: &E::Filter) -> StoreResult<i64>;

    async fn get(&self, id: E::Id) -> StoreResult<E>;

    async fn exists(&self, id: E::Id) -> StoreResult<bool>;

    async fn is_owner(&self, id: E::Id, user_id: DbId) -> StoreResult<bool>;

    /// Insert, then re-read the stored row.
    async fn create(&self, input: &E::Input, created_by: DbId) -> StoreResult<E>;

    /// Replace every client-writable column, then re-read the stored row.
    async fn update(&self, id: E::Id, input: &E::Input, modified_by: DbId) -> StoreResult<E>;

    async fn soft_delete(&self, id: E::Id, deleted_by: DbId) -> StoreResult<()>;
}

/// Record-only read paths.
#[async_trait]
pub trait RecordQueries: Send + Sync {
    async fn search(&self, filter: &RecordFilter, page: Page) -> StoreResult<Vec<RecordSummary>>;

    /// One `FeatureCollection` document.
    async fn geojson(&self, filter: &RecordFilter, page: Page) -> StoreResult<String>;

    async fn list_by_external_id(
        &self,
        external_id: i32,
        page: Page,
    ) -> StoreResult<Vec<RecordSummary>>;
}

#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Whether a non-deleted category with this id exists.
    async fn category_exists(&self, id: DbId) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_is_no_rows() {
        assert_matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NoRows);
    }

    #[test]
    fn other_errors_stay_database_errors() {
        assert_matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Database(sqlx::Error::PoolTimedOut)
        );
    }

    #[test]
    fn empty_list_is_no_rows() {
        assert_matches!(non_empty(Vec::<i32>::new()), Err(StoreError::NoRows));
        assert_eq!(non_empty(vec![1]).unwrap(), vec![1]);
    }
}
