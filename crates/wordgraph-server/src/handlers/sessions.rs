//! Session lifecycle handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::schema::sessions::{CreateSessionRequest, CreateSessionResponse};
use crate::state::{parse_session_id, AppState};

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /sessions`
///
/// The body is optional; an empty body uses the server defaults.
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let req: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid session config: {}", e)))?
    };

    let graph = state.new_graph(req.apply(state.defaults))?;
    let id = state.sessions.create(graph);
    tracing::info!(session = %id, "session created");

    Ok(Json(CreateSessionResponse { session_id: id.0 }))
}

/// `DELETE /sessions/{id}`
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_session_id(&id)?;
    if !state.sessions.remove(&id) {
        return Err(ApiError::NotFound(format!("session {} not found", id)));
    }
    tracing::info!(session = %id, "session deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// `POST /sessions/{id}/reset`
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.session(&id)?;
    let mut graph = session.lock().await;
    graph.reset();
    graph.warm_up()?;
    Ok(Json(serde_json::json!({ "success": true })))
}
