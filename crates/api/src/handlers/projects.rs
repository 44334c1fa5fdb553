//! Handlers for the `/projects` resource and project-level settings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wirekit_core::active::{resolve_active_components, resolve_inactive_components};
use wirekit_core::integrity::{scan_project, IntegrityReport};
use wirekit_core::model::Project;
use wirekit_core::registry::{ComponentKind, ComponentType};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub client_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameProjectRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DuplicateProjectRequest {
    pub name: Option<String>,
}

/// `activeComponents: null` allows every registered type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveComponentsRequest {
    pub active_components: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveComponentsResponse {
    /// The stored allow-list; `None` means unrestricted.
    pub allow_list: Option<Vec<ComponentKind>>,
    pub active: Vec<ComponentType>,
    pub inactive: Vec<ComponentType>,
}

type ProjectResponse = AppResult<Json<DataResponse<Project>>>;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = state.store.list_projects(params.client_id.as_deref()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = state.store.create_project(&input.client_id, &input.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ProjectResponse {
    let project = state.store.get_project(&id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Replaces the full project graph. The body's `id` must match the path.
pub async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Project>,
) -> ProjectResponse {
    if input.id != id {
        return Err(AppError::BadRequest(format!(
            "Body id {} does not match path id {id}",
            input.id
        )));
    }
    let project = state.store.replace_project(input).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/v1/projects/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RenameProjectRequest>,
) -> ProjectResponse {
    let project = state.store.rename_project(&id, &input.name).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.store.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/duplicate
pub async fn duplicate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    input: Option<Json<DuplicateProjectRequest>>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let name = input.and_then(|Json(body)| body.name);
    let project = state.store.duplicate_project(&id, name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects/{id}/navigation
pub async fn update_navigation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> ProjectResponse {
    let project = state.store.update_navigation_config(&id, &raw).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}/footer
pub async fn update_footer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> ProjectResponse {
    let project = state.store.update_footer_config(&id, &raw).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}/welcome
pub async fn update_welcome(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> ProjectResponse {
    let project = state.store.update_welcome_config(&id, &raw).await?;
    Ok(Json(DataResponse { data: project }))
}

fn active_components_view(project: &Project) -> ActiveComponentsResponse {
    let allow_list = project.active_components.as_deref();
    ActiveComponentsResponse {
        allow_list: project.active_components.clone(),
        active: resolve_active_components(allow_list).into_iter().collect(),
        inactive: resolve_inactive_components(allow_list).into_iter().collect(),
    }
}

/// GET /api/v1/projects/{id}/active-components
pub async fn get_active_components(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ActiveComponentsResponse>>> {
    let project = state.store.get_project(&id).await?;
    Ok(Json(DataResponse {
        data: active_components_view(&project),
    }))
}

/// PUT /api/v1/projects/{id}/active-components
pub async fn set_active_components(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ActiveComponentsRequest>,
) -> AppResult<Json<DataResponse<ActiveComponentsResponse>>> {
    let project = state
        .store
        .set_active_components(&id, input.active_components.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: active_components_view(&project),
    }))
}

/// GET /api/v1/projects/{id}/integrity
///
/// Scans the stored document. Never repairs.
pub async fn integrity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<IntegrityReport>>> {
    let project = state.store.get_project(&id).await?;
    let document =
        serde_json::to_value(&project).map_err(|e| AppError::InternalError(e.to_string()))?;
    let report = scan_project(&document, "$");
    if !report.is_clean() {
        tracing::warn!(project_id = %id, issues = report.issues.len(), "Integrity issues found");
    }
    Ok(Json(DataResponse { data: report }))
}
