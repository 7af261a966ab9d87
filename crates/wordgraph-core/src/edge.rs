//! Edge types for both graph layers.
//!
//! The word graph uses [`WordEdge`], a tagged record whose [`EdgeKind`]
//! distinguishes semantic from temporal relations. Several kinds may share the
//! same ordered node pair, but there is at most one record per
//! `(source, target, kind)`. The lemma graph uses [`LemmaEdge`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Word graph edges
// ---------------------------------------------------------------------------

/// The relation a word edge records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Thresholded embedding similarity. Always present in both directions
    /// with identical weight.
    Semantic,
    /// Recency-derived co-occurrence score inside the sliding window.
    Temporal,
}

/// An edge in the word graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEdge {
    pub kind: EdgeKind,
    pub weight: f32,
    /// Clock tick at which the edge was first created.
    pub creation_tick: u64,
}

impl WordEdge {
    pub fn semantic(weight: f32, creation_tick: u64) -> Self {
        WordEdge {
            kind: EdgeKind::Semantic,
            weight,
            creation_tick,
        }
    }

    pub fn temporal(weight: f32, creation_tick: u64) -> Self {
        WordEdge {
            kind: EdgeKind::Temporal,
            weight,
            creation_tick,
        }
    }

    /// Returns `true` if this is a semantic edge.
    pub fn is_semantic(&self) -> bool {
        self.kind == EdgeKind::Semantic
    }

    /// Returns `true` if this is a temporal edge.
    pub fn is_temporal(&self) -> bool {
        self.kind == EdgeKind::Temporal
    }
}

// ---------------------------------------------------------------------------
// Lemma graph edges
// ---------------------------------------------------------------------------

/// An undirected edge between two lemmas. The weight only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LemmaEdge {
    pub weight: f32,
    pub creation_tick: u64,
}

// ---------------------------------------------------------------------------
// Serialized edge type tag
// ---------------------------------------------------------------------------

/// The `type` tag written for every serialized edge, covering both layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Semantic,
    Temporal,
    Lemma,
}

impl From<EdgeKind> for EdgeType {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Semantic => EdgeType::Semantic,
            EdgeKind::Temporal => EdgeType::Temporal,
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeType::Semantic => "semantic",
            EdgeType::Temporal => "temporal",
            EdgeType::Lemma => "lemma",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_edge_kind_predicates() {
        let sem = WordEdge::semantic(0.8, 3);
        assert!(sem.is_semantic());
        assert!(!sem.is_temporal());

        let tmp = WordEdge::temporal(0.6, 4);
        assert!(tmp.is_temporal());
        assert!(!tmp.is_semantic());
        assert_eq!(tmp.creation_tick, 4);
    }

    #[test]
    fn edge_type_from_kind() {
        assert_eq!(EdgeType::from(EdgeKind::Semantic), EdgeType::Semantic);
        assert_eq!(EdgeType::from(EdgeKind::Temporal), EdgeType::Temporal);
    }

    #[test]
    fn edge_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EdgeType::Lemma).unwrap(),
            "\"lemma\""
        );
        assert_eq!(EdgeType::Semantic.to_string(), "semantic");
    }

    #[test]
    fn word_edge_serializes_camel_case() {
        let json = serde_json::to_value(WordEdge::temporal(0.5, 7)).unwrap();
        assert_eq!(json["kind"], "temporal");
        assert_eq!(json["creationTick"], 7);
        assert_eq!(json["weight"], 0.5);
    }
}
