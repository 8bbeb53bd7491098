//! Per-entity descriptors consumed by the generic service.

use std::fmt::{Debug, Display};

use georecord_core::access::AccessPolicy;
use georecord_core::types::{DbId, RecordId};

use crate::models::category::{Category, CategoryInput, CategorySummary};
use crate::models::filter::{CategoryFilter, RecordFilter};
use crate::models::record::{Record, RecordInput, RecordSummary};

/// What the service needs to know about an entity type.
pub trait Entity: Debug + Send + Sync + Sized + 'static {
    /// Human-readable name used in errors and logs.
    const NAME: &'static str;
    const POLICY: AccessPolicy;

    type Id: Copy + Display + Debug + Send + Sync + 'static;
    type Summary: Send + Sync + 'static;
    type Input: Send + Sync + 'static;
    type Filter: Send + Sync + 'static;

    fn input_name(input: &Self::Input) -> &str;

    /// Fix the id of a row about to be created, if the client controls it.
    fn assign_id(input: &mut Self::Input) -> Option<Self::Id>;

    /// The category a row must reference, if any.
    fn category_of(input: &Self::Input) -> Option<DbId>;
}

impl Entity for Record {
    const NAME: &'static str = "Record";
    const POLICY: AccessPolicy = AccessPolicy::Owner;

    type Id = RecordId;
    type Summary = RecordSummary;
    type Input = RecordInput;
    type Filter = RecordFilter;

    fn input_name(input: &RecordInput) -> &str {
        &input.name
    }

    fn assign_id(input: &mut RecordInput) -> Option<RecordId> {
        Some(*input.id.get_or_insert_with(uuid::Uuid::now_v7))
    }

    fn category_of(input: &RecordInput) -> Option<DbId> {
        Some(input.type_id)
    }
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    const POLICY: AccessPolicy = AccessPolicy::AdminOnly;

    type Id = DbId;
    type Summary = CategorySummary;
    type Input = CategoryInput;
    type Filter = CategoryFilter;

    fn input_name(input: &CategoryInput) -> &str {
        &input.name
    }

    fn assign_id(_input: &mut CategoryInput) -> Option<DbId> {
        None
    }

    fn category_of(_input: &CategoryInput) -> Option<DbId> {
        None
    }
}
