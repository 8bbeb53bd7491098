//! Route definitions for the `/records` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::record;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /search                            -> search
/// GET    /count                             -> count
/// GET    /geojson                           -> geojson
/// GET    /by-external-id/{external_id}      -> list_by_external_id
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(record::list).post(record::create))
        .route("/search", get(record::search))
        .route("/count", get(record::count))
        .route("/geojson", get(record::geojson))
        .route(
            "/by-external-id/{external_id}",
            get(record::list_by_external_id),
        )
        .route(
            "/{id}",
            get(record::get_by_id)
                .put(record::update)
                .delete(record::delete),
        )
}
