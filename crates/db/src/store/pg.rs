//! PostgreSQL-backed store.

use async_trait::async_trait;
use georecord_core::pagination::Page;
use georecord_core::types::{DbId, RecordId};
use sqlx::PgPool;

use super::{non_empty, CategoryLookup, EntityStore, RecordQueries, StoreError, StoreResult};
use crate::models::category::{Category, CategoryInput, CategorySummary};
use crate::models::filter::{CategoryFilter, RecordFilter};
use crate::models::record::{Record, RecordInput, RecordSummary};
use crate::repositories::{CategoryRepo, RecordRepo};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fail unless at least one category exists. Records cannot be created
    /// without one, so the service refuses to start on an empty table.
    pub async fn ensure_categories(&self) -> StoreResult<i64> {
        let count = CategoryRepo::count_all(&self.pool).await?;
        if count == 0 {
            return Err(StoreError::NoRows);
        }
        tracing::debug!(count, "Categories available");
        Ok(count)
    }
}

fn written(affected: bool) -> StoreResult<()> {
    if affected {
        Ok(())
    } else {
        Err(StoreError::NothingAffected)
    }
}

#[async_trait]
impl EntityStore<Record> for PgStore {
    async fn list(&self, filter: &RecordFilter, page: Page) -> StoreResult<Vec<RecordSummary>> {
        let rows = RecordRepo::list(&self.pool, &filter.without_keywords(), page).await?;
        non_empty(rows)
    }

    async fn count(&self, filter: &RecordFilter) -> StoreResult<i64> {
        Ok(RecordRepo::count(&self.pool, filter).await?)
    }

    async fn get(&self, id: RecordId) -> StoreResult<Record> {
        RecordRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NoRows)
    }

    async fn exists(&self, id: RecordId) -> StoreResult<bool> {
        Ok(RecordRepo::exists(&self.pool, id).await?)
    }

    async fn is_owner(&self, id: RecordId, user_id: DbId) -> StoreResult<bool> {
        Ok(RecordRepo::is_owner(&self.pool, id, user_id).await?)
    }

    async fn create(&self, input: &RecordInput, created_by: DbId) -> StoreResult<Record> {
        let id = input.id.unwrap_or_else(uuid::Uuid::now_v7);
        written(RecordRepo::insert(&self.pool, id, input, created_by).await?)?;
        tracing::debug!(record_id = %id, created_by, "Record inserted");
        EntityStore::<Record>::get(self, id).await
    }

    async fn update(
        &self,
        id: RecordId,
        input: &RecordInput,
        modified_by: DbId,
    ) -> StoreResult<Record> {
        written(RecordRepo::update(&self.pool, id, input, modified_by).await?)?;
        EntityStore::<Record>::get(self, id).await
    }

    async fn soft_delete(&self, id: RecordId, deleted_by: DbId) -> StoreResult<()> {
        written(RecordRepo::soft_delete(&self.pool, id, deleted_by).await?)
    }
}

#[async_trait]
impl RecordQueries for PgStore {
    async fn search(&self, filter: &RecordFilter, page: Page) -> StoreResult<Vec<RecordSummary>> {
        non_empty(RecordRepo::list(&self.pool, filter, page).await?)
    }

    async fn geojson(&self, filter: &RecordFilter, page: Page) -> StoreResult<String> {
        RecordRepo::geojson(&self.pool, &filter.without_keywords(), page)
            .await?
            .ok_or(StoreError::NoRows)
    }

    async fn list_by_external_id(
        &self,
        external_id: i32,
        page: Page,
    ) -> StoreResult<Vec<RecordSummary>> {
        non_empty(RecordRepo::list_by_external_id(&self.pool, external_id, page).await?)
    }
}

#[async_trait]
impl EntityStore<Category> for PgStore {
    async fn list(&self, filter: &CategoryFilter, page: Page) -> StoreResult<Vec<CategorySummary>> {
        non_empty(CategoryRepo::list(&self.pool, filter, page).await?)
    }

    async fn count(&self, filter: &CategoryFilter) -> StoreResult<i64> {
        Ok(CategoryRepo::count(&self.pool, filter).await?)
    }

    async fn get(&self, id: DbId) -> StoreResult<Category> {
        CategoryRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NoRows)
    }

    async fn exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::exists(&self.pool, id).await?)
    }

    async fn is_owner(&self, id: DbId, user_id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::is_owner(&self.pool, id, user_id).await?)
    }

    async fn create(&self, input: &CategoryInput, created_by: DbId) -> StoreResult<Category> {
        let id = CategoryRepo::insert(&self.pool, input, created_by)
            .await?
            .ok_or(StoreError::NothingAffected)?;
        tracing::debug!(category_id = id, created_by, "Category inserted");
        EntityStore::<Category>::get(self, id).await
    }

    async fn update(
        &self,
        id: DbId,
        input: &CategoryInput,
        modified_by: DbId,
    ) -> StoreResult<Category> {
        written(CategoryRepo::update(&self.pool, id, input, modified_by).await?)?;
        EntityStore::<Category>::get(self, id).await
    }

    async fn soft_delete(&self, id: DbId, deleted_by: DbId) -> StoreResult<()> {
        written(CategoryRepo::soft_delete(&self.pool, id, deleted_by).await?)
    }
}

#[async_trait]
impl CategoryLookup for PgStore {
    async fn category_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::exists(&self.pool, id).await?)
    }
}
