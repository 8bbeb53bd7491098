//! Repository for the `categories` table.

use georecord_core::pagination::Page;
use georecord_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryInput, CategorySummary};
use crate::models::filter::CategoryFilter;
use crate::query::category as sql;

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List categories ordered by name. Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &CategoryFilter,
        page: Page,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        let q = sql::list(filter, page)?;
        sqlx::query_as_with::<_, CategorySummary, _>(&q.sql, q.args)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &CategoryFilter) -> Result<i64, sqlx::Error> {
        let q = sql::count(filter)?;
        sqlx::query_scalar_with::<_, i64, _>(&q.sql, q.args)
            .fetch_one(pool)
            .await
    }

    /// Number of live categories, ignoring every filter.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE deleted = false")
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(&sql::get_sql())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND deleted = false)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn is_owner(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE id = $1 AND created_by = $2 AND deleted = false)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a category, returning its generated id.
    pub async fn insert(
        pool: &PgPool,
        input: &CategoryInput,
        created_by: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(&sql::insert_sql())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.comment)
            .bind(input.external_id)
            .bind(&input.table_name)
            .bind(&input.geometry_type)
            .bind(input.managed_by)
            .bind(&input.icon_path)
            .bind(&input.more_data_schema)
            .bind(created_by)
            .fetch_optional(pool)
            .await
    }

    /// Replace every client-writable column. Returns `true` if a row was
    /// updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CategoryInput,
        modified_by: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql::update_sql())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.comment)
            .bind(input.external_id)
            .bind(&input.table_name)
            .bind(&input.geometry_type)
            .bind(input.managed_by)
            .bind(&input.icon_path)
            .bind(&input.more_data_schema)
            .bind(input.inactivated)
            .bind(input.inactivated_time)
            .bind(input.inactivated_by)
            .bind(&input.inactivated_reason)
            .bind(modified_by)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a category. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, deleted_by: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET deleted = true, deleted_by = $2, deleted_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND deleted = false",
        )
        .bind(id)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
