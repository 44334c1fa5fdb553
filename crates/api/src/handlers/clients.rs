//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use wirekit_core::model::Client;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClientNameRequest {
    pub name: String,
}

/// GET /api/v1/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = state.store.list_clients().await?;
    Ok(Json(DataResponse { data: clients }))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ClientNameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    let client = state.store.create_client(&input.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = state.store.get_client(&id).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clients/{id}
///
/// Full upsert. The body's `id` must match the path.
pub async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Client>,
) -> AppResult<Json<DataResponse<Client>>> {
    if input.id != id {
        return Err(AppError::BadRequest(format!(
            "Body id {} does not match path id {id}",
            input.id
        )));
    }
    let client = state.store.replace_client(input).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PATCH /api/v1/clients/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ClientNameRequest>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = state.store.rename_client(&id, &input.name).await?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete_client(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
