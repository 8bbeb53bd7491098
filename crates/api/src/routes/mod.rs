pub mod category;
pub mod health;
pub mod record;

use axum::routing::get;
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /records                                   list, create
/// /records/search                            full-text search (GET)
/// /records/count                             count (GET)
/// /records/geojson                           FeatureCollection (GET)
/// /records/by-external-id/{external_id}      list by external id (GET)
/// /records/{id}                              get, update, delete
///
/// /categories                                list, create (create: admin only)
/// /categories/count                          count (GET)
/// /categories/{id}                           get, update, delete (admin only)
///
/// /status                                    caller's token claims (GET)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/records", record::router())
        .nest("/categories", category::router())
        .route("/status", get(status::get_status))
}
