//! Application state shared by all handlers.

use std::sync::Arc;

use uuid::Uuid;
use wordgraph_core::{Collaborators, GraphConfig, WordGraph};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::session::{SessionId, SessionRegistry, SharedGraph};

/// Shared application state for the HTTP server.
///
/// Every session graph is built from `collab` and a config derived from
/// `defaults`.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub defaults: GraphConfig,
    pub collab: Collaborators,
}

impl AppState {
    pub fn new(defaults: GraphConfig, collab: Collaborators) -> Self {
        AppState {
            sessions: Arc::new(SessionRegistry::new()),
            defaults,
            collab,
        }
    }

    /// State with the default collaborators sized by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.graph,
            Collaborators::with_defaults(config.embedding_dim),
        )
    }

    /// Builds and warms up a graph for a new session.
    pub fn new_graph(&self, config: GraphConfig) -> Result<WordGraph, ApiError> {
        let mut graph = WordGraph::new(config, self.collab.clone());
        graph.warm_up()?;
        Ok(graph)
    }

    /// Resolves a session id from a path segment.
    pub fn session(&self, raw_id: &str) -> Result<SharedGraph, ApiError> {
        let id = parse_session_id(raw_id)?;
        self.sessions
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("session {} not found", id)))
    }
}

pub fn parse_session_id(raw_id: &str) -> Result<SessionId, ApiError> {
    Uuid::parse_str(raw_id).map(SessionId).map_err(|_| {
        ApiError::BadRequest(format!("invalid session id '{}': expected UUID", raw_id))
    })
}
