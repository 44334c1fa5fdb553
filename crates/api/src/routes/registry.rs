use axum::routing::{get, post};
use axum::Router;

use crate::handlers::registry;
use crate::state::AppState;

/// ```text
/// GET    /registry   -> catalog
/// POST   /render     -> render_preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registry", get(registry::catalog))
        .route("/render", post(registry::render_preview))
}
