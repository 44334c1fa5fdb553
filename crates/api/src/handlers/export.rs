use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use wirekit_core::error::CoreError;
use wirekit_core::model::display::slugify;
use wirekit_export::{export_project, ExportContext};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const UNKNOWN_CLIENT: &str = "Unknown client";

/// GET /api/v1/projects/{id}/export
///
/// Streams the static site as a zip attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project = state.store.get_project(&project_id).await?;
    let client_name = match state.store.get_client(&project.client_id).await {
        Ok(client) => client.name,
        Err(CoreError::NotFound { .. }) => UNKNOWN_CLIENT.to_string(),
        Err(e) => return Err(e.into()),
    };

    let ctx = ExportContext {
        client_name,
        generated_at: Utc::now(),
    };
    let file_stem = match slugify(&project.name) {
        stem if stem.is_empty() => "project".to_string(),
        stem => stem,
    };

    let stylesheet = state.stylesheet.clone();
    let archive = tokio::task::spawn_blocking(move || {
        export_project(&project, &ctx, stylesheet.as_ref())
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Export task failed: {e}")))??;

    tracing::info!(project_id = %project_id, bytes = archive.len(), "Project exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_stem}-wireframes.zip\""),
            ),
        ],
        archive,
    ))
}
