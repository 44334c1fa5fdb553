//! Handlers for stakeholder comments.
//!
//! Submission and status changes go through the store; the full-record
//! `PUT` exists so a remote client can mirror its local state.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wirekit_core::comment::{Comment, CommentStatus, NewComment};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub page_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: CommentStatus,
    pub resolved_by: Option<String>,
}

/// POST /api/v1/comments
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<NewComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let comment = state.store.submit_comment(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/projects/{id}/comments?page_id=
pub async fn list_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    let comments = state
        .store
        .list_comments(&project_id, params.page_id.as_deref())
        .await?;
    Ok(Json(DataResponse { data: comments }))
}

/// GET /api/v1/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = state.store.get_comment(&id).await?;
    Ok(Json(DataResponse { data: comment }))
}

/// PUT /api/v1/comments/{id}
pub async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(comment): Json<Comment>,
) -> AppResult<Json<DataResponse<Comment>>> {
    if comment.id != id {
        return Err(AppError::BadRequest(format!(
            "Body id {} does not match path id {id}",
            comment.id
        )));
    }
    let comment = state.store.replace_comment(comment).await?;
    Ok(Json(DataResponse { data: comment }))
}

/// PUT /api/v1/comments/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = state
        .store
        .set_comment_status(&id, input.status, input.resolved_by)
        .await?;
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete_comment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
