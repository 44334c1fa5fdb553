//! Handlers for placed components nested under
//! `/projects/{id}/pages/{page_id}/components`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wirekit_core::error::CoreError;
use wirekit_core::model::{Page, PlacedComponent};
use wirekit_core::schema::FormView;
use wirekit_core::store::NewComponent;
use wirekit_core::types::{EntityId, PropsBag};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub component_ids: Vec<EntityId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePropsRequest {
    pub props: PropsBag,
}

/// `helpText: null` reverts to the type's default; `""` clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpTextRequest {
    pub help_text: Option<String>,
}

type ComponentPath = Path<(String, String, String)>;

fn found(component: Option<PlacedComponent>, id: &str) -> Result<PlacedComponent, CoreError> {
    component.ok_or_else(|| CoreError::not_found("Component", id))
}

/// POST /api/v1/projects/{id}/pages/{page_id}/components
pub async fn add(
    State(state): State<AppState>,
    Path((project_id, page_id)): Path<(String, String)>,
    Json(input): Json<NewComponent>,
) -> AppResult<(StatusCode, Json<DataResponse<PlacedComponent>>)> {
    let component = state
        .store
        .add_component(&project_id, &page_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: component })))
}

/// PUT /api/v1/projects/{id}/pages/{page_id}/components/order
pub async fn reorder(
    State(state): State<AppState>,
    Path((project_id, page_id)): Path<(String, String)>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Page>>> {
    let page = state
        .store
        .reorder_components(&project_id, &page_id, &input.component_ids)
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// PATCH /api/v1/projects/{id}/pages/{page_id}/components/{cid}
pub async fn update_props(
    State(state): State<AppState>,
    Path((project_id, page_id, component_id)): ComponentPath,
    Json(input): Json<UpdatePropsRequest>,
) -> AppResult<Json<DataResponse<PlacedComponent>>> {
    let updated = state
        .store
        .update_component(&project_id, &page_id, &component_id, &input.props)
        .await?;
    Ok(Json(DataResponse {
        data: found(updated, &component_id)?,
    }))
}

/// DELETE /api/v1/projects/{id}/pages/{page_id}/components/{cid}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, page_id, component_id)): ComponentPath,
) -> AppResult<StatusCode> {
    state
        .store
        .delete_component(&project_id, &page_id, &component_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/pages/{page_id}/components/{cid}/help-text
pub async fn update_help_text(
    State(state): State<AppState>,
    Path((project_id, page_id, component_id)): ComponentPath,
    Json(input): Json<HelpTextRequest>,
) -> AppResult<Json<DataResponse<PlacedComponent>>> {
    let updated = state
        .store
        .update_component_help_text(&project_id, &page_id, &component_id, input.help_text)
        .await?;
    Ok(Json(DataResponse {
        data: found(updated, &component_id)?,
    }))
}

/// GET /api/v1/projects/{id}/pages/{page_id}/components/{cid}/form
pub async fn get_form(
    State(state): State<AppState>,
    Path((project_id, page_id, component_id)): ComponentPath,
) -> AppResult<Json<DataResponse<FormView>>> {
    let form = state
        .store
        .component_form(&project_id, &page_id, &component_id)
        .await?;
    Ok(Json(DataResponse { data: form }))
}

/// PUT /api/v1/projects/{id}/pages/{page_id}/components/{cid}/form
///
/// Body is the flat form values (`tab1Label`, `itemCount`, ...).
pub async fn apply_form(
    State(state): State<AppState>,
    Path((project_id, page_id, component_id)): ComponentPath,
    Json(flat): Json<PropsBag>,
) -> AppResult<Json<DataResponse<PlacedComponent>>> {
    let updated = state
        .store
        .update_component_form(&project_id, &page_id, &component_id, &flat)
        .await?;
    Ok(Json(DataResponse {
        data: found(updated, &component_id)?,
    }))
}
