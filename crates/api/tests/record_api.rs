//! HTTP-level integration tests for the `/records` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::header::CONTENT_TYPE;
use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{
    admin_token, body_json, body_string, build_test_app, create_record, delete, get_auth,
    post_json, put_json, record_body, user_token, ALICE, BOB,
};
use georecord_api::error::{AppError, CLIENT_CLOSED_REQUEST};
use georecord_api::state::AppState;
use georecord_core::error::CoreError;
use georecord_core::pagination::Page;
use georecord_db::models::filter::RecordFilter;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_record_returns_201_with_server_audit_fields(pool: PgPool) {
    let mut body = record_body("Fontaine du Bourg");
    body["created_by"] = serde_json::json!(555);
    body["deleted"] = serde_json::json!(true);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/records",
        &user_token(ALICE),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Fontaine du Bourg");
    assert_eq!(json["created_by"], ALICE);
    assert_eq!(json["deleted"], false);
    assert!(json["created_at"].is_string());
    assert!(json["last_modified_at"].is_null());
    assert_eq!(json["pos_x"], 2537607.64);
    assert_eq!(json["pos_y"], 1152609.12);
    assert_eq!(json["id"].as_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_client_id_keeps_it(pool: PgPool) {
    let id = uuid::Uuid::now_v7();
    let mut body = record_body("Fontaine du Bourg");
    body["id"] = serde_json::json!(id);

    let created = create_record(&pool, ALICE, body).await;
    assert_eq!(created["id"], id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_record_by_any_user(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/records/{id}"),
        &user_token(BOB),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Fontaine du Bourg");
    assert_eq!(json["created_by"], ALICE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_record_returns_404(pool: PgPool) {
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/records/{}", uuid::Uuid::now_v7()),
        &user_token(ALICE),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Create: validation errors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_name_is_a_validation_error(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/records",
        &user_token(ALICE),
        record_body("Banc"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Validation failed: name must be at least 5 characters (got 4)"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_category_returns_422(pool: PgPool) {
    let mut body = record_body("Fontaine du Bourg");
    body["type_id"] = serde_json::json!(9999);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/records",
        &user_token(ALICE),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "CATEGORY_NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_id_returns_409(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let mut body = record_body("Fontaine de la Gare");
    body["id"] = created["id"].clone();

    let response = post_json(
        build_test_app(pool),
        "/api/v1/records",
        &user_token(BOB),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "ALREADY_EXISTS");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_can_update(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();

    let mut body = record_body("Fontaine du Bourg restauree");
    body["pos_x"] = serde_json::json!(2537700.0);
    body["validated"] = serde_json::json!(true);

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/records/{id}"),
        &user_token(ALICE),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Fontaine du Bourg restauree");
    assert_eq!(json["validated"], true);
    assert_eq!(json["pos_x"], 2537700.0);
    assert_eq!(json["last_modified_by"], ALICE);
    assert!(json["last_modified_at"].is_string());
    assert_eq!(json["created_by"], ALICE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owner_update_is_forbidden(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/records/{id}"),
        &user_token(BOB),
        record_body("Fontaine de Bob"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    // Admins do not bypass record ownership.
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/records/{id}"),
        &admin_token(),
        record_body("Fontaine admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_mismatched_body_id_returns_400(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();
    let mut body = record_body("Fontaine du Bourg");
    body["id"] = serde_json::json!(uuid::Uuid::now_v7());

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/records/{id}"),
        &user_token(ALICE),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_record_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/records/{}", uuid::Uuid::now_v7()),
        &user_token(ALICE),
        record_body("Fontaine du Bourg"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_204_and_hides_record(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/records/{id}");

    let response = delete(build_test_app(pool.clone()), &uri, &user_token(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool.clone()), &uri, &user_token(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool.clone()), &uri, &user_token(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/records",
        &user_token(ALICE),
    )
    .await;
    assert_eq!(body_json(response).await, serde_json::json!([]));

    // The row is still there, flagged.
    let deleted_by: Option<i64> = sqlx::query_scalar("SELECT deleted_by FROM records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(deleted_by, Some(ALICE));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owner_delete_is_forbidden(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    let id = created["id"].as_str().unwrap();

    let response = delete(
        build_test_app(pool),
        &format!("/api/v1/records/{id}"),
        &user_token(BOB),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// List / search / count
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_pagination(pool: PgPool) {
    create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;
    create_record(&pool, BOB, record_body("Fontaine de la Gare")).await;
    let mut tree = record_body("Chene du parc");
    tree["type_id"] = serde_json::json!(3);
    create_record(&pool, ALICE, tree).await;

    let token = user_token(ALICE);
    let list = |uri: &'static str| {
        let pool = pool.clone();
        let token = token.clone();
        async move { body_json(get_auth(build_test_app(pool), uri, &token).await).await }
    };

    // Newest first.
    let all = list("/api/v1/records").await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["Chene du parc", "Fontaine de la Gare", "Fontaine du Bourg"]
    );

    assert_eq!(list("/api/v1/records?type=3").await.as_array().unwrap().len(), 1);
    assert_eq!(list("/api/v1/records?type=0").await, serde_json::json!([]));
    assert_eq!(
        list("/api/v1/records?created_by=12").await.as_array().unwrap().len(),
        1
    );
    assert_eq!(
        list("/api/v1/records?validated=false").await.as_array().unwrap().len(),
        3
    );
    assert_eq!(list("/api/v1/records?validated=true").await, serde_json::json!([]));

    let page = list("/api/v1/records?limit=1&offset=1").await;
    assert_eq!(page[0]["name"], "Fontaine de la Gare");

    // List ignores keywords.
    assert_eq!(
        list("/api/v1/records?keywords=introuvable")
            .await
            .as_array()
            .unwrap()
            .len(),
        3
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_ignores_accents(pool: PgPool) {
    create_record(&pool, ALICE, record_body("École du Centre")).await;
    create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/records/search?keywords=ecole",
        &user_token(BOB),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "École du Centre");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_applies_keywords(pool: PgPool) {
    create_record(&pool, ALICE, record_body("École du Centre")).await;
    create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;

    let count = |uri: &'static str| {
        let pool = pool.clone();
        async move {
            body_json(get_auth(build_test_app(pool), uri, &user_token(ALICE)).await).await
        }
    };

    assert_eq!(count("/api/v1/records/count").await["count"], 2);
    assert_eq!(count("/api/v1/records/count?keywords=bourg").await["count"], 1);
    assert_eq!(count("/api/v1/records/count?type=2").await["count"], 0);
}

// ---------------------------------------------------------------------------
// GeoJSON / external id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_geojson_content_type_and_features(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/records/geojson",
        &user_token(BOB),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/geo+json"
    );
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"][0]["properties"]["id"], created["id"]);
    assert_eq!(
        json["features"][0]["properties"]["icon_path"],
        "img/fontaine.svg"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_geojson_empty_is_an_empty_collection(pool: PgPool) {
    let response = get_auth(
        build_test_app(pool),
        "/api/v1/records/geojson",
        &user_token(ALICE),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "FeatureCollection", "features": []})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_geojson_ignores_keywords_like_list(pool: PgPool) {
    let created = create_record(&pool, ALICE, record_body("Fontaine du Bourg")).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/records/geojson?keywords=zzzz",
        &user_token(BOB),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["features"].as_array().unwrap().len(), 1);
    assert_eq!(json["features"][0]["properties"]["id"], created["id"]);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/records/search?keywords=zzzz",
        &user_token(BOB),
    )
    .await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_service_call_renders_499(pool: PgPool) {
    let state = AppState::new(pool, common::test_config());
    let token = CancellationToken::new();
    token.cancel();

    let err = state
        .records
        .list(&token, Page::records(None, None), &RecordFilter::default())
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Cancelled);

    let response = AppError::from(err).into_response();
    assert_eq!(response.status().as_u16(), CLIENT_CLOSED_REQUEST);
    assert_eq!(body_json(response).await["code"], "CANCELLED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_external_id(pool: PgPool) {
    let mut linked = record_body("Fontaine du Bourg");
    linked["external_id"] = serde_json::json!(4021);
    create_record(&pool, ALICE, linked).await;
    create_record(&pool, ALICE, record_body("Fontaine de la Gare")).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/records/by-external-id/4021",
        &user_token(BOB),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["external_id"], 4021);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/records/by-external-id/1",
        &user_token(BOB),
    )
    .await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}
