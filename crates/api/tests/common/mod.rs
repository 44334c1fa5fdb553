#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wirekit_core::persistence::memory::MemoryPersistence;
use wirekit_core::persistence::Persistence;
use wirekit_core::store::BuilderStore;
use wirekit_export::EmbeddedStylesheet;

use wirekit_api::config::{PersistenceBackend, ServerConfig};
use wirekit_api::router::build_app_router;
use wirekit_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and in-memory persistence.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        persistence: PersistenceBackend::Memory,
        export_stylesheet: None,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The returned router shares one store across clones, so a test can send
/// several requests with `app.clone()` and see its own writes.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(MemoryPersistence::new()), test_config())
}

/// Build the router over any persistence backend.
pub fn build_app_with(persistence: Arc<dyn Persistence>, config: ServerConfig) -> Router {
    let state = AppState {
        store: Arc::new(BuilderStore::new(persistence)),
        config: Arc::new(config.clone()),
        stylesheet: Arc::new(EmbeddedStylesheet),
    };
    build_app_router(state, &config)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The `data` field of an enveloped success response.
pub async fn data(response: Response<Body>) -> Value {
    body_json(response).await["data"].clone()
}

/// Create a client and a project under it; returns `(client_id, project_id)`.
pub async fn seed_project(app: &Router, client: &str, project: &str) -> (String, String) {
    let client = data(post_json(app, "/api/v1/clients", serde_json::json!({ "name": client })).await).await;
    let client_id = client["id"].as_str().unwrap().to_string();
    let project = data(
        post_json(
            app,
            "/api/v1/projects",
            serde_json::json!({ "clientId": client_id, "name": project }),
        )
        .await,
    )
    .await;
    (client_id, project["id"].as_str().unwrap().to_string())
}

/// Add a page and return its id.
pub async fn seed_page(app: &Router, project_id: &str, name: &str, page_type: &str) -> String {
    let page = data(
        post_json(
            app,
            &format!("/api/v1/projects/{project_id}/pages"),
            serde_json::json!({ "name": name, "type": page_type }),
        )
        .await,
    )
    .await;
    page["id"].as_str().unwrap().to_string()
}
