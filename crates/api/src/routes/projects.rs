//! Route definitions for the `/projects` resource.
//!
//! Also nests page and placed-component routes under
//! `/projects/{id}/pages/...`.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{comments, components, export, pages, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> upsert
/// PATCH  /{id}                               -> rename
/// DELETE /{id}                               -> delete
/// POST   /{id}/duplicate                     -> duplicate
/// PUT    /{id}/navigation                    -> update_navigation
/// PUT    /{id}/footer                        -> update_footer
/// PUT    /{id}/welcome                       -> update_welcome
/// GET    /{id}/active-components             -> get_active_components
/// PUT    /{id}/active-components             -> set_active_components
/// GET    /{id}/integrity                     -> integrity
/// GET    /{id}/export                        -> download
/// GET    /{id}/comments                      -> list_for_project
///
/// POST   /{id}/pages                         -> add
/// PATCH  /{id}/pages/{page_id}               -> update
/// DELETE /{id}/pages/{page_id}               -> delete
/// GET    /{id}/pages/{page_id}/preview       -> preview
///
/// POST   /{id}/pages/{page_id}/components                    -> add
/// PUT    /{id}/pages/{page_id}/components/order              -> reorder
/// PATCH  /{id}/pages/{page_id}/components/{cid}              -> update_props
/// DELETE /{id}/pages/{page_id}/components/{cid}              -> delete
/// PUT    /{id}/pages/{page_id}/components/{cid}/help-text    -> update_help_text
/// GET    /{id}/pages/{page_id}/components/{cid}/form         -> get_form
/// PUT    /{id}/pages/{page_id}/components/{cid}/form         -> apply_form
/// ```
pub fn router() -> Router<AppState> {
    let component_routes = Router::new()
        .route("/", post(components::add))
        .route("/order", put(components::reorder))
        .route(
            "/{cid}",
            patch(components::update_props).delete(components::delete),
        )
        .route("/{cid}/help-text", put(components::update_help_text))
        .route(
            "/{cid}/form",
            get(components::get_form).put(components::apply_form),
        );

    let page_routes = Router::new()
        .route("/", post(pages::add))
        .route("/{page_id}", patch(pages::update).delete(pages::delete))
        .route("/{page_id}/preview", get(pages::preview))
        .nest("/{page_id}/components", component_routes);

    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::upsert)
                .patch(projects::rename)
                .delete(projects::delete),
        )
        .route("/{id}/duplicate", post(projects::duplicate))
        .route("/{id}/navigation", put(projects::update_navigation))
        .route("/{id}/footer", put(projects::update_footer))
        .route("/{id}/welcome", put(projects::update_welcome))
        .route(
            "/{id}/active-components",
            get(projects::get_active_components).put(projects::set_active_components),
        )
        .route("/{id}/integrity", get(projects::integrity))
        .route("/{id}/export", get(export::download))
        .route("/{id}/comments", get(comments::list_for_project))
        .nest("/{id}/pages", page_routes)
}
