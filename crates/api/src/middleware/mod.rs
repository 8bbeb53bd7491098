//! Request extractors shared by every handler.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from a JWT Bearer token.
//! - [`cancel::RequestScope`] -- a cancellation token tied to the request's lifetime.

pub mod auth;
pub mod cancel;
