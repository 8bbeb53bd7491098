//! Repository for the `records` table.

use georecord_core::pagination::Page;
use georecord_core::types::{DbId, RecordId};
use sqlx::PgPool;

use crate::models::filter::RecordFilter;
use crate::models::record::{Record, RecordInput, RecordSummary};
use crate::query::record as sql;

/// Provides CRUD and filtered reads for records.
pub struct RecordRepo;

impl RecordRepo {
    /// List or search records, newest first. Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &RecordFilter,
        page: Page,
    ) -> Result<Vec<RecordSummary>, sqlx::Error> {
        let q = sql::list(filter, page)?;
        sqlx::query_as_with::<_, RecordSummary, _>(&q.sql, q.args)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &RecordFilter) -> Result<i64, sqlx::Error> {
        let q = sql::count(filter)?;
        sqlx::query_scalar_with::<_, i64, _>(&q.sql, q.args)
            .fetch_one(pool)
            .await
    }

    /// Render matching records as one GeoJSON `FeatureCollection`.
    ///
    /// Returns `None` when no record matches.
    pub async fn geojson(
        pool: &PgPool,
        filter: &RecordFilter,
        page: Page,
    ) -> Result<Option<String>, sqlx::Error> {
        let q = sql::geojson(filter, page)?;
        sqlx::query_scalar_with::<_, Option<String>, _>(&q.sql, q.args)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_external_id(
        pool: &PgPool,
        external_id: i32,
        page: Page,
    ) -> Result<Vec<RecordSummary>, sqlx::Error> {
        let q = sql::list_by_external_id(external_id, page)?;
        sqlx::query_as_with::<_, RecordSummary, _>(&q.sql, q.args)
            .fetch_all(pool)
            .await
    }

    /// Find a record by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Record>, sqlx::Error> {
        sqlx::query_as::<_, Record>(&sql::get_sql())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM records WHERE id = $1 AND deleted = false)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn is_owner(pool: &PgPool, id: RecordId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM records \
             WHERE id = $1 AND created_by = $2 AND deleted = false)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a record. Returns `true` if a row was written.
    pub async fn insert(
        pool: &PgPool,
        id: RecordId,
        input: &RecordInput,
        created_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql::insert_sql())
            .bind(id)
            .bind(input.type_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.comment)
            .bind(input.external_id)
            .bind(&input.external_ref)
            .bind(input.build_at)
            .bind(&input.status)
            .bind(&input.contained_by)
            .bind(input.contained_by_old)
            .bind(input.validated)
            .bind(input.validated_time)
            .bind(input.validated_by)
            .bind(input.managed_by)
            .bind(created_by)
            .bind(&input.more_data)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace every client-writable column. Returns `true` if a row was
    /// updated.
    pub async fn update(
        pool: &PgPool,
        id: RecordId,
        input: &RecordInput,
        modified_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql::update_sql())
            .bind(id)
            .bind(input.type_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.comment)
            .bind(input.external_id)
            .bind(&input.external_ref)
            .bind(input.build_at)
            .bind(&input.status)
            .bind(&input.contained_by)
            .bind(input.contained_by_old)
            .bind(input.validated)
            .bind(input.validated_time)
            .bind(input.validated_by)
            .bind(input.managed_by)
            .bind(input.inactivated)
            .bind(input.inactivated_time)
            .bind(input.inactivated_by)
            .bind(&input.inactivated_reason)
            .bind(&input.more_data)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(modified_by)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a record. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        id: RecordId,
        deleted_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE records SET deleted = true, deleted_by = $2, deleted_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND deleted = false",
        )
        .bind(id)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
