//! Handlers for pages nested under `/projects/{id}/pages`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use wirekit_core::error::CoreError;
use wirekit_core::model::{Page, PageType};
use wirekit_core::store::current_year;
use wirekit_export::documents;
use wirekit_export::stylesheet::document_css;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub page_type: PageType,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<PageType>,
}

/// POST /api/v1/projects/{id}/pages
pub async fn add(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(input): Json<CreatePageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Page>>)> {
    let page = state
        .store
        .add_page(&project_id, &input.name, input.page_type)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PATCH /api/v1/projects/{id}/pages/{page_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, page_id)): Path<(String, String)>,
    Json(input): Json<UpdatePageRequest>,
) -> AppResult<Json<DataResponse<Page>>> {
    if input.name.is_none() && input.page_type.is_none() {
        return Err(AppError::BadRequest(
            "Provide a name or a type to update".to_string(),
        ));
    }

    let mut page = None;
    if let Some(name) = &input.name {
        page = Some(state.store.rename_page(&project_id, &page_id, name).await?);
    }
    if let Some(page_type) = input.page_type {
        page = Some(
            state
                .store
                .set_page_type(&project_id, &page_id, page_type)
                .await?,
        );
    }

    let page =
        page.ok_or_else(|| AppError::InternalError("Page update produced no page".into()))?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/projects/{id}/pages/{page_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, page_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.store.delete_page(&project_id, &page_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/pages/{page_id}/preview
///
/// The page as a standalone document, built exactly like its exported file.
pub async fn preview(
    State(state): State<AppState>,
    Path((project_id, page_id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let project = state.store.get_project(&project_id).await?;
    let page = project
        .page(&page_id)
        .ok_or_else(|| CoreError::not_found("Page", page_id.as_str()))?;
    let css = document_css(state.stylesheet.as_ref());
    let document = documents::page_document(&project, page, current_year(), &css);
    Ok(Html(document.html))
}
