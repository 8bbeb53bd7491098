//! Per-request cancellation.
//!
//! Axum drops the handler future when the client disconnects or the timeout
//! layer fires. [`RequestScope`] owns a [`DropGuard`], so dropping the
//! future cancels the token and any storage call racing it stops.
//! The `Cancelled` error produced at that point has no response to land in;
//! its 499 mapping is for callers holding their own token.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio_util::sync::{CancellationToken, DropGuard};

pub struct RequestScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestScope {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestScope {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new())
    }
}
