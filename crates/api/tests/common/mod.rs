#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bodyfit_api::config::{ServerConfig, StorageBackend};
use bodyfit_api::router::build_app_router;
use bodyfit_api::state::AppState;
use bodyfit_core::access::{ApiKeyRegistry, DEFAULT_API_KEYS};
use bodyfit_db::repositories::MemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_KEY: &str = "admin_secret_key_123";
pub const USER_KEY: &str = "user_readonly_key_456";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the development API keys.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        run_migrations: false,
        api_keys: ApiKeyRegistry::parse(DEFAULT_API_KEYS).unwrap(),
    }
}

/// Build the full application router over `store`.
///
/// Clones of a [`MemoryStore`] share data, so a test can build a fresh app
/// per request and still see earlier writes.
pub fn build_test_app(store: MemoryStore) -> Router {
    let config = test_config();
    let state = AppState::memory(store, config.api_keys.clone());
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("api_key", key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// GET with the read-only user key.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(USER_KEY), None).await
}

/// GET with an explicit key (or none).
pub async fn get_with_key(app: Router, uri: &str, key: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, key, None).await
}

/// POST a JSON body with the admin key.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(ADMIN_KEY), Some(body)).await
}

pub async fn post_json_with_key(
    app: Router,
    uri: &str,
    body: Value,
    key: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, key, Some(body)).await
}

/// POST a raw body (not necessarily JSON) with the admin key.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("api_key", ADMIN_KEY)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT a JSON body with the admin key.
pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(ADMIN_KEY), Some(body)).await
}

pub async fn put_json_with_key(
    app: Router,
    uri: &str,
    body: Value,
    key: Option<&str>,
) -> Response<Body> {
    send(app, Method::PUT, uri, key, Some(body)).await
}

/// DELETE with the admin key.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(ADMIN_KEY), None).await
}

pub async fn delete_with_key(app: Router, uri: &str, key: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, key, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid trainer payload.
pub fn trainer_payload(last_name: &str) -> Value {
    serde_json::json!({
        "last_name": last_name,
        "first_name": "Анна",
        "middle_name": "Сергеевна",
        "name_of_training_session": "Йога",
    })
}

/// A valid appointment payload, optionally referencing a trainer.
pub fn appointment_payload(last_name: &str, trainer_id: Option<i64>) -> Value {
    serde_json::json!({
        "last_name": last_name,
        "first_name": "Игорь",
        "phone": "+79001234567",
        "name_of_training_session": "Кроссфит",
        "trainer_id": trainer_id,
    })
}

/// Create a trainer through the API and return its id.
pub async fn create_trainer(store: &MemoryStore, last_name: &str) -> i64 {
    let response = post_json(
        build_test_app(store.clone()),
        "/trainers",
        trainer_payload(last_name),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create an appointment through the API and return its id.
pub async fn create_appointment(store: &MemoryStore, payload: Value) -> i64 {
    let response = post_json(build_test_app(store.clone()), "/appointments", payload).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
