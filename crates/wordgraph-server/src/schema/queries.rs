//! Schema types for read-only queries.

use serde::Serialize;
use wordgraph_core::WordNode;

#[derive(Debug, Clone, Serialize)]
pub struct WindowResponse {
    pub window: Vec<String>,
    pub tick: u64,
}

/// A word node with its incident edges as `[source, target]` pairs.
#[derive(Debug, Clone, Serialize)]
pub struct WordResponse {
    pub word: WordNode,
    pub incoming: Vec<(String, String)>,
    pub outgoing: Vec<(String, String)>,
}
