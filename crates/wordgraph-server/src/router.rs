//! Router assembly for the wordgraph HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::sessions::health))
        // Session lifecycle
        .route("/sessions", post(handlers::sessions::create_session))
        .route("/sessions/{id}", delete(handlers::sessions::delete_session))
        .route(
            "/sessions/{id}/reset",
            post(handlers::sessions::reset_session),
        )
        // Ingestion
        .route("/sessions/{id}/text", post(handlers::ingest::ingest_text))
        .route(
            "/sessions/{id}/frames",
            post(handlers::ingest::ingest_frames),
        )
        .route("/sessions/{id}/enrich", post(handlers::ingest::enrich))
        // Export and queries
        .route(
            "/sessions/{id}/snapshot",
            get(handlers::queries::snapshot),
        )
        .route("/sessions/{id}/diff", get(handlers::queries::diff))
        .route(
            "/sessions/{id}/diff/clear",
            post(handlers::queries::clear_diff),
        )
        .route("/sessions/{id}/window", get(handlers::queries::window))
        .route(
            "/sessions/{id}/words/{word}",
            get(handlers::queries::word),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
