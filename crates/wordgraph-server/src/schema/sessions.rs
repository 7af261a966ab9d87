//! Schema types for session lifecycle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wordgraph_core::GraphConfig;

/// Request to create a session. Absent fields take the server defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub window_capacity: Option<usize>,
    pub semantic_threshold: Option<f32>,
}

impl CreateSessionRequest {
    /// Overlays the requested values on `defaults`.
    pub fn apply(&self, defaults: GraphConfig) -> GraphConfig {
        GraphConfig {
            window_capacity: self.window_capacity.unwrap_or(defaults.window_capacity),
            semantic_threshold: self
                .semantic_threshold
                .unwrap_or(defaults.semantic_threshold),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}
