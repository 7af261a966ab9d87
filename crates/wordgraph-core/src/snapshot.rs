//! Full-state serialization of both graph layers.
//!
//! A [`Snapshot`] is built on demand from the live graph and is independent
//! of the diff accumulator. Field names are camelCase and all numbers are
//! plain JSON numbers; transports relay this shape unchanged.

use serde::{Deserialize, Serialize};

use crate::edge::EdgeType;
use crate::node::{LemmaNode, WordNode};

/// Wire form of a single edge in either layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub weight: f32,
    #[serde(rename = "type")]
    pub kind: EdgeType,
    pub creation_tick: u64,
}

/// Complete state of a word graph and its lemma graph at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tick: u64,
    pub window: Vec<String>,
    pub nodes: Vec<WordNode>,
    pub edges: Vec<EdgeView>,
    pub lemma_nodes: Vec<LemmaNode>,
    pub lemma_edges: Vec<EdgeView>,
}

impl Snapshot {
    /// Looks up a word node by id.
    pub fn node(&self, word: &str) -> Option<&WordNode> {
        self.nodes.iter().find(|n| n.word == word)
    }

    /// Looks up a word edge by endpoints and type.
    pub fn edge(&self, source: &str, target: &str, kind: EdgeType) -> Option<&EdgeView> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target && e.kind == kind)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
