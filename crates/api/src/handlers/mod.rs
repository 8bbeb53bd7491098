//! Request handlers.
//!
//! Each submodule provides the async handler functions for one entity.
//! Handlers authenticate the caller, open a [`RequestScope`] and delegate
//! to the entity's service in [`AppState`]; errors map via [`AppError`].
//!
//! [`RequestScope`]: crate::middleware::cancel::RequestScope
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

use serde::Serialize;

pub mod category;
pub mod record;
pub mod status;

/// Body of the `/count` endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
