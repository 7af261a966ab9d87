//! Ingestion and enrichment handlers.

use axum::extract::{Path, State};
use axum::Json;
use wordgraph_core::{BufferMode, GraphError};

use crate::error::ApiError;
use crate::schema::ingest::{
    EnrichRequest, FramesResponse, IngestFramesRequest, IngestTextRequest, IngestTextResponse,
};
use crate::state::AppState;

/// `POST /sessions/{id}/text`
pub async fn ingest_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<IngestTextRequest>,
) -> Result<Json<IngestTextResponse>, ApiError> {
    let session = state.session(&id)?;
    let mut graph = session.lock().await;
    graph.ingest_text(&req.text, req.reset_window)?;

    Ok(Json(IngestTextResponse {
        tick: graph.tick(),
        node_count: graph.word_count(),
        edge_count: graph.edge_count(),
    }))
}

/// `POST /sessions/{id}/frames`
pub async fn ingest_frames(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<IngestFramesRequest>,
) -> Result<Json<FramesResponse>, ApiError> {
    let session = state.session(&id)?;
    let mut graph = session.lock().await;
    let frames = graph
        .ingest_text_frames(&req.text, req.reset_window, req.frame_step.unwrap_or(1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(FramesResponse { frames }))
}

/// `POST /sessions/{id}/enrich`
pub async fn enrich(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EnrichRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.session(&id)?;
    let mut graph = session.lock().await;
    match (req.text, req.mode) {
        (Some(text), _) => graph.enrich_text(&text)?,
        (None, Some(mode)) => graph.enrich(mode.parse::<BufferMode>()?)?,
        (None, None) => return Err(GraphError::EmptyInput.into()),
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
