//! Business orchestration: validation, authorization and storage calls in a
//! fixed order, for any [`Entity`].
//!
//! Every call takes a [`CancellationToken`]. Each storage future is raced
//! against it; on cancellation the in-flight query future is dropped and the
//! call fails with [`CoreError::Cancelled`].

use std::future::Future;
use std::marker::PhantomData;

use georecord_core::access::{Operation, Principal};
use georecord_core::error::CoreError;
use georecord_core::pagination::Page;
use georecord_core::validation::validate_name;
use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::models::category::Category;
use crate::models::filter::RecordFilter;
use crate::models::record::{Record, RecordSummary};
use crate::store::pg::PgStore;
use crate::store::{CategoryLookup, EntityStore, RecordQueries, StoreError, StoreResult};

/// What GeoJSON returns when nothing matches.
pub const EMPTY_FEATURE_COLLECTION: &str = r#"{"type":"FeatureCollection","features":[]}"#;

pub struct EntityService<E, S> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

pub type RecordService<S = PgStore> = EntityService<Record, S>;
pub type CategoryService<S = PgStore> = EntityService<Category, S>;

/// Run a storage future unless `cancel` fires first.
async fn race<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = StoreResult<T>>,
) -> Result<StoreResult<T>, CoreError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CoreError::Cancelled),
        res = fut => Ok(res),
    }
}

fn internal(entity: &'static str, op: &'static str, err: StoreError) -> CoreError {
    tracing::error!(entity, op, error = %err, "Storage call failed");
    CoreError::Internal(format!("{op} {entity}: {err}"))
}

/// "No rows" is an empty collection for list-shaped reads.
fn rows_or_empty<T>(
    entity: &'static str,
    op: &'static str,
    res: StoreResult<Vec<T>>,
) -> Result<Vec<T>, CoreError> {
    match res {
        Ok(rows) => Ok(rows),
        Err(StoreError::NoRows) => Ok(Vec::new()),
        Err(e) => Err(internal(entity, op, e)),
    }
}

impl<E, S> EntityService<E, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<E, S> EntityService<E, S>
where
    E: Entity,
    S: EntityStore<E> + CategoryLookup,
{
    async fn ensure_exists(
        &self,
        cancel: &CancellationToken,
        id: E::Id,
        op: &'static str,
    ) -> Result<(), CoreError> {
        let found = race(cancel, self.store.exists(id))
            .await?
            .map_err(|e| internal(E::NAME, op, e))?;
        if !found {
            return Err(CoreError::not_found(E::NAME, id));
        }
        Ok(())
    }

    async fn ensure_owner(
        &self,
        cancel: &CancellationToken,
        principal: &Principal,
        id: E::Id,
        op: Operation,
    ) -> Result<(), CoreError> {
        if !E::POLICY.requires_ownership(op) {
            return Ok(());
        }
        let owns = race(cancel, self.store.is_owner(id, principal.user_id))
            .await?
            .map_err(|e| internal(E::NAME, op.verb(), e))?;
        if !owns {
            tracing::warn!(
                entity = E::NAME,
                id = %id,
                user_id = principal.user_id,
                op = op.verb(),
                "Ownership check failed",
            );
            return Err(CoreError::Forbidden(format!(
                "only the creator may {} this {}",
                op.verb(),
                E::NAME
            )));
        }
        Ok(())
    }

    async fn ensure_category(
        &self,
        cancel: &CancellationToken,
        input: &E::Input,
        op: &'static str,
    ) -> Result<(), CoreError> {
        let Some(category_id) = E::category_of(input) else {
            return Ok(());
        };
        let found = race(cancel, self.store.category_exists(category_id))
            .await?
            .map_err(|e| internal(E::NAME, op, e))?;
        if !found {
            return Err(CoreError::CategoryNotFound(category_id));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
        page: Page,
        filter: &E::Filter,
    ) -> Result<Vec<E::Summary>, CoreError> {
        let res = race(cancel, self.store.list(filter, page)).await?;
        rows_or_empty(E::NAME, "list", res)
    }

    pub async fn count(
        &self,
        cancel: &CancellationToken,
        filter: &E::Filter,
    ) -> Result<i64, CoreError> {
        match race(cancel, self.store.count(filter)).await? {
            Ok(n) => Ok(n),
            Err(StoreError::NoRows) => Ok(0),
            Err(e) => Err(internal(E::NAME, "count", e)),
        }
    }

    pub async fn get(
        &self,
        cancel: &CancellationToken,
        principal: &Principal,
        id: E::Id,
    ) -> Result<E, CoreError> {
        E::POLICY.check_role(principal, Operation::Get, E::NAME)?;
        self.ensure_exists(cancel, id, "get").await?;
        match race(cancel, self.store.get(id)).await? {
            Ok(row) => Ok(row),
            Err(StoreError::NoRows) => Err(CoreError::not_found(E::NAME, id)),
            Err(e) => Err(internal(E::NAME, "get", e)),
        }
    }

    /// The caller becomes the owner of the new row.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        principal: &Principal,
        mut input: E::Input,
    ) -> Result<E, CoreError> {
        E::POLICY.check_role(principal, Operation::Create, E::NAME)?;
        validate_name("name", E::input_name(&input))?;
        self.ensure_category(cancel, &input, "create").await?;

        let id = E::assign_id(&mut input);
        if let Some(id) = id {
            let taken = race(cancel, self.store.exists(id))
                .await?
                .map_err(|e| internal(E::NAME, "create", e))?;
            if taken {
                return Err(CoreError::already_exists(E::NAME, id));
            }
        }

        match race(cancel, self.store.create(&input, principal.user_id)).await? {
            Ok(row) => {
                tracing::info!(
                    entity = E::NAME,
                    id = ?id,
                    created_by = principal.user_id,
                    "Entity created",
                );
                Ok(row)
            }
            Err(StoreError::Duplicate) => Err(match id {
                Some(id) => CoreError::already_exists(E::NAME, id),
                None => CoreError::already_exists(E::NAME, "new"),
            }),
            Err(e) => Err(internal(E::NAME, "create", e)),
        }
    }

    /// Full replacement of the client-writable columns.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        principal: &Principal,
        id: E::Id,
        input: E::Input,
    ) -> Result<E, CoreError> {
        E::POLICY.check_role(principal, Operation::Update, E::NAME)?;
        self.ensure_exists(cancel, id, "update").await?;
        self.ensure_owner(cancel, principal, id, Operation::Update)
            .await?;
        validate_name("name", E::input_name(&input))?;
        self.ensure_category(cancel, &input, "update").await?;

        let row = race(cancel, self.store.update(id, &input, principal.user_id))
            .await?
            .map_err(|e| internal(E::NAME, "update", e))?;
        tracing::info!(
            entity = E::NAME,
            id = %id,
            modified_by = principal.user_id,
            "Entity updated",
        );
        Ok(row)
    }

    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        principal: &Principal,
        id: E::Id,
    ) -> Result<(), CoreError> {
        E::POLICY.check_role(principal, Operation::Delete, E::NAME)?;
        self.ensure_exists(cancel, id, "delete").await?;
        self.ensure_owner(cancel, principal, id, Operation::Delete)
            .await?;

        race(cancel, self.store.soft_delete(id, principal.user_id))
            .await?
            .map_err(|e| internal(E::NAME, "delete", e))?;
        tracing::info!(
            entity = E::NAME,
            id = %id,
            deleted_by = principal.user_id,
            "Entity soft-deleted",
        );
        Ok(())
    }
}

impl<S> EntityService<Record, S>
where
    S: EntityStore<Record> + RecordQueries + CategoryLookup,
{
    /// List filtered by French full-text keywords.
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        page: Page,
        filter: &RecordFilter,
    ) -> Result<Vec<RecordSummary>, CoreError> {
        let res = race(cancel, self.store.search(filter, page)).await?;
        rows_or_empty(Record::NAME, "search", res)
    }

    pub async fn geojson(
        &self,
        cancel: &CancellationToken,
        page: Page,
        filter: &RecordFilter,
    ) -> Result<String, CoreError> {
        match race(cancel, self.store.geojson(filter, page)).await? {
            Ok(doc) => Ok(doc),
            Err(StoreError::NoRows) => Ok(EMPTY_FEATURE_COLLECTION.to_string()),
            Err(e) => Err(internal(Record::NAME, "geojson", e)),
        }
    }

    pub async fn list_by_external_id(
        &self,
        cancel: &CancellationToken,
        page: Page,
        external_id: i32,
    ) -> Result<Vec<RecordSummary>, CoreError> {
        let res = race(cancel, self.store.list_by_external_id(external_id, page)).await?;
        rows_or_empty(Record::NAME, "list_by_external_id", res)
    }
}

