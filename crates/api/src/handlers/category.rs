//! Handlers for the `/categories` resource.
//!
//! Listing and counting are open to any authenticated user; everything
//! else is refused with `ADMIN_REQUIRED` for non-admins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use georecord_core::types::DbId;
use georecord_db::models::category::{Category, CategoryInput, CategorySummary};

use crate::error::AppResult;
use crate::handlers::CountResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::cancel::RequestScope;
use crate::query::CategoryListParams;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<CategoryListParams>,
) -> AppResult<Json<Vec<CategorySummary>>> {
    let page = params.page(&state.config);
    let rows = state
        .categories
        .list(scope.token(), page, &params.filter())
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/categories/count
pub async fn count(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<CategoryListParams>,
) -> AppResult<Json<CountResponse>> {
    let count = state
        .categories
        .count(scope.token(), &params.filter())
        .await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Json(input): Json<CategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state
        .categories
        .create(scope.token(), &user.principal(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = state
        .categories
        .get(scope.token(), &user.principal(), id)
        .await?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let category = state
        .categories
        .update(scope.token(), &user.principal(), id, input)
        .await?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .categories
        .delete(scope.token(), &user.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
