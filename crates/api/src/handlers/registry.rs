//! Handlers for the component registry and the live preview renderer.

use axum::Json;
use serde::{Deserialize, Serialize};
use wirekit_core::registry::{self, CatalogEntry, ComponentKind};
use wirekit_core::render;
use wirekit_core::types::PropsBag;

use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub props: PropsBag,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

/// GET /api/v1/registry
pub async fn catalog() -> Json<DataResponse<Vec<CatalogEntry>>> {
    Json(DataResponse {
        data: registry::catalog(),
    })
}

/// POST /api/v1/render
///
/// Same renderer as the exporter. Unknown types and bad props come back as
/// placeholder markup with a 200.
pub async fn render_preview(
    Json(input): Json<RenderRequest>,
) -> Json<DataResponse<RenderResponse>> {
    let html = render::render_or_placeholder(&input.kind, &input.props).to_html();
    Json(DataResponse {
        data: RenderResponse { html },
    })
}
