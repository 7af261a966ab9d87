//! Schema types for ingestion and enrichment.

use serde::{Deserialize, Serialize};
use wordgraph_core::Snapshot;

/// Request to ingest raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestTextRequest {
    pub text: String,
    /// Empty the sliding window before ingesting.
    #[serde(default)]
    pub reset_window: bool,
}

/// Graph size after an ingest call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestTextResponse {
    pub tick: u64,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Request to ingest text and collect periodic snapshots.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestFramesRequest {
    pub text: String,
    #[serde(default)]
    pub reset_window: bool,
    /// Tokens between frames (default 1).
    pub frame_step: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FramesResponse {
    pub frames: Vec<Snapshot>,
}

/// Request for an enrichment pass: either over `text`, or over the buffer
/// named by `mode` (`"sentence"` or `"paragraph"`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichRequest {
    pub text: Option<String>,
    pub mode: Option<String>,
}
