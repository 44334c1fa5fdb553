pub mod clients;
pub mod comments;
pub mod health;
pub mod projects;
pub mod registry;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /registry                                        catalog + field schemas
/// /render                                          preview render (POST)
///
/// /clients                                         list, create
/// /clients/{id}                                    get, upsert, rename, delete
///
/// /projects                                        list (?client_id=), create
/// /projects/{id}                                   get, upsert, rename, delete
/// /projects/{id}/duplicate                         duplicate (POST)
/// /projects/{id}/navigation|footer|welcome         replace settings (PUT)
/// /projects/{id}/active-components                 get, replace
/// /projects/{id}/export                            zip download
/// /projects/{id}/integrity                         scan report
/// /projects/{id}/comments                          list (?page_id=)
/// /projects/{id}/pages                             add
/// /projects/{id}/pages/{page_id}                   rename/retype, delete
/// /projects/{id}/pages/{page_id}/preview           rendered page (HTML)
/// /projects/{id}/pages/{page_id}/components        add
/// /projects/{id}/pages/{page_id}/components/order  reorder (PUT)
/// /projects/{id}/pages/{page_id}/components/{cid}  merge props, delete
/// /projects/{id}/pages/{page_id}/components/{cid}/help-text   (PUT)
/// /projects/{id}/pages/{page_id}/components/{cid}/form        get, apply
///
/// /comments                                        submit
/// /comments/{id}                                   get, upsert, delete
/// /comments/{id}/status                            change status (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Component registry and live preview.
        .merge(registry::router())
        .nest("/clients", clients::router())
        // Projects, including pages and placed components.
        .nest("/projects", projects::router())
        .nest("/comments", comments::router())
}
