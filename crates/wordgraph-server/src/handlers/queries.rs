//! Read-only query handlers, plus diff clearing.

use axum::extract::{Path, State};
use axum::Json;
use wordgraph_core::{DiffSet, Snapshot};

use crate::error::ApiError;
use crate::schema::queries::{WindowResponse, WordResponse};
use crate::state::AppState;

/// `GET /sessions/{id}/snapshot`
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let session = state.session(&id)?;
    let graph = session.lock().await;
    Ok(Json(graph.snapshot()))
}

/// `GET /sessions/{id}/diff`
///
/// Returns the accumulated records without clearing them.
pub async fn diff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiffSet>, ApiError> {
    let session = state.session(&id)?;
    let graph = session.lock().await;
    Ok(Json(graph.drain_diff()))
}

/// `POST /sessions/{id}/diff/clear`
pub async fn clear_diff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.session(&id)?;
    session.lock().await.clear_diff();
    Ok(Json(serde_json::json!({ "success": true })))
}

/// `GET /sessions/{id}/window`
pub async fn window(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WindowResponse>, ApiError> {
    let session = state.session(&id)?;
    let graph = session.lock().await;
    Ok(Json(WindowResponse {
        window: graph.window(),
        tick: graph.tick(),
    }))
}

/// `GET /sessions/{id}/words/{word}`
pub async fn word(
    State(state): State<AppState>,
    Path((id, word)): Path<(String, String)>,
) -> Result<Json<WordResponse>, ApiError> {
    let session = state.session(&id)?;
    let graph = session.lock().await;
    let node = graph
        .get_word(&word)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("word '{}' not found", word)))?;
    let edges = graph.incident_edges(&word);

    Ok(Json(WordResponse {
        word: node,
        incoming: edges.incoming,
        outgoing: edges.outgoing,
    }))
}
