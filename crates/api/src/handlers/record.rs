//! Handlers for the `/records` resource.

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use georecord_core::types::RecordId;
use georecord_db::models::record::{Record, RecordInput, RecordSummary};

use crate::error::{AppError, AppResult};
use crate::handlers::CountResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::cancel::RequestScope;
use crate::query::{PaginationParams, RecordListParams};
use crate::state::AppState;

pub const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// GET /api/v1/records
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<RecordListParams>,
) -> AppResult<Json<Vec<RecordSummary>>> {
    let page = params.page(&state.config);
    let rows = state
        .records
        .list(scope.token(), page, &params.filter())
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/records/search
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<RecordListParams>,
) -> AppResult<Json<Vec<RecordSummary>>> {
    let page = params.page(&state.config);
    let rows = state
        .records
        .search(scope.token(), page, &params.filter())
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/records/count
pub async fn count(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<RecordListParams>,
) -> AppResult<Json<CountResponse>> {
    let count = state.records.count(scope.token(), &params.filter()).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/records/geojson
///
/// The FeatureCollection is built in the database and passed through as-is.
pub async fn geojson(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Query(params): Query<RecordListParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page(&state.config);
    let doc = state
        .records
        .geojson(scope.token(), page, &params.filter())
        .await?;
    Ok(([(CONTENT_TYPE, GEOJSON_CONTENT_TYPE)], doc))
}

/// GET /api/v1/records/by-external-id/{external_id}
pub async fn list_by_external_id(
    State(state): State<AppState>,
    _user: AuthUser,
    scope: RequestScope,
    Path(external_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<RecordSummary>>> {
    let page = params.records(&state.config);
    let rows = state
        .records
        .list_by_external_id(scope.token(), page, external_id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/records
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Json(input): Json<RecordInput>,
) -> AppResult<(StatusCode, Json<Record>)> {
    let record = state
        .records
        .create(scope.token(), &user.principal(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/records/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<RecordId>,
) -> AppResult<Json<Record>> {
    let record = state
        .records
        .get(scope.token(), &user.principal(), id)
        .await?;
    Ok(Json(record))
}

/// PUT /api/v1/records/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<RecordId>,
    Json(input): Json<RecordInput>,
) -> AppResult<Json<Record>> {
    if let Some(body_id) = input.id {
        if body_id != id {
            return Err(AppError::BadRequest(format!(
                "Body id {body_id} does not match path id {id}"
            )));
        }
    }
    let record = state
        .records
        .update(scope.token(), &user.principal(), id, input)
        .await?;
    Ok(Json(record))
}

/// DELETE /api/v1/records/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    scope: RequestScope,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    state
        .records
        .delete(scope.token(), &user.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
