//! Handler for the caller's token status.

use axum::Json;

use crate::auth::jwt::Claims;
use crate::middleware::auth::AuthUser;

/// GET /api/v1/status
///
/// Echoes the validated claims of the calling token, extra claims included.
pub async fn get_status(user: AuthUser) -> Json<Claims> {
    tracing::info!(
        user_id = user.user_id,
        login = %user.claims.login,
        extra_claims = user.claims.extra.len(),
        "Token status requested",
    );
    Json(user.claims)
}
