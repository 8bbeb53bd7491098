#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use georecord_api::auth::jwt::{JwtChecker, JwtConfig};
use georecord_api::config::ServerConfig;
use georecord_api::router::build_app_router;
use georecord_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Ids of users the tests act as.
pub const ALICE: i64 = 11;
pub const BOB: i64 = 12;
pub const ADMIN: i64 = 99;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        record_default_limit: 50,
        category_default_limit: 250,
        max_limit: 1000,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

pub fn token_for(user_id: i64, is_admin: bool) -> String {
    JwtChecker::new(&test_config().jwt)
        .issue(user_id, &format!("user{user_id}"), is_admin)
        .unwrap()
}

pub fn user_token(user_id: i64) -> String {
    token_for(user_id, false)
}

pub fn admin_token() -> String {
    token_for(ADMIN, true)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// GET without credentials.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// A valid record body in the seeded "Fontaine" category.
pub fn record_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "type_id": 1,
        "name": name,
        "description": "Fontaine en pierre",
        "pos_x": 2537607.64,
        "pos_y": 1152609.12,
    })
}

/// Create a record as `user_id` and return its JSON.
pub async fn create_record(pool: &PgPool, user_id: i64, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/records",
        &user_token(user_id),
        body,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
