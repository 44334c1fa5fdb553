use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// POST   /              -> submit
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> upsert
/// DELETE /{id}          -> delete
/// PUT    /{id}/status   -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(comments::submit))
        .route(
            "/{id}",
            get(comments::get_by_id)
                .put(comments::upsert)
                .delete(comments::delete),
        )
        .route("/{id}/status", put(comments::set_status))
}
