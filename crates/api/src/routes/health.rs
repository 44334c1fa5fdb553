use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use wirekit_core::registry::ComponentType;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the persistence backend does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub persistence: PersistenceHealth,
    /// Size of the component registry this build serves.
    pub component_types: usize,
}

#[derive(Debug, Serialize)]
pub struct PersistenceHealth {
    /// `postgres`, `file` or `memory`.
    pub backend: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
///
/// Answers 503 while the backend is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let check = state.store.persistence().health_check().await;
    if let Err(e) = &check {
        tracing::warn!(error = %e, "Persistence health check failed");
    }

    let persistence = PersistenceHealth {
        backend: state.config.persistence.kind(),
        healthy: check.is_ok(),
        error: check.err().map(|e| e.to_string()),
    };
    let (code, status) = if persistence.healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            persistence,
            component_types: ComponentType::ALL.len(),
        }),
    )
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
