//! WordGraph: the word multigraph, its derived lemma graph, and the node and
//! edge managers that mutate them.
//!
//! [`WordGraph`] is the single entry point for building and querying a graph
//! instance. It owns every node, edge, cache and buffer; nothing is shared
//! between instances except the immutable [`Collaborators`].
//!
//! # Layout
//!
//! - **Word graph** (`StableGraph<WordNode, WordEdge, Directed>`): words keyed
//!   by an insertion-ordered index. Each ordered node pair holds at most one
//!   edge per [`EdgeKind`].
//! - **Lemma graph** ([`LemmaGraph`]): undirected, written only as a side
//!   effect of semantic proposals.
//!
//! Every mutation appends to the [`DiffTracker`]. The ingestion pipeline that
//! decides *when* edges are proposed lives in [`crate::pipeline`].

use std::collections::VecDeque;

use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::collab::Collaborators;
use crate::config::GraphConfig;
use crate::diff::{DiffRecord, DiffSet, DiffTracker};
use crate::edge::{EdgeKind, EdgeType, WordEdge};
use crate::embedding::EmbeddingCache;
use crate::error::GraphError;
use crate::lemma::LemmaGraph;
use crate::node::WordNode;
use crate::snapshot::{EdgeView, Snapshot};

/// Incoming and outgoing edges of one word, one `(source, target)` tuple per
/// edge instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentEdges {
    pub incoming: Vec<(String, String)>,
    pub outgoing: Vec<(String, String)>,
}

/// A word graph instance.
pub struct WordGraph {
    graph: StableGraph<WordNode, WordEdge, Directed, u32>,
    /// Word → node index, in node creation order.
    index: IndexMap<String, NodeIndex<u32>>,
    lemmas: LemmaGraph,
    pub(crate) embeddings: EmbeddingCache,
    pub(crate) diff: DiffTracker,
    pub(crate) window: VecDeque<String>,
    pub(crate) sentence: Vec<String>,
    pub(crate) paragraph: Vec<String>,
    pub(crate) tick: u64,
    pub(crate) config: GraphConfig,
    pub(crate) collab: Collaborators,
}

impl WordGraph {
    /// Creates an empty graph at tick 0.
    pub fn new(config: GraphConfig, collab: Collaborators) -> Self {
        WordGraph {
            graph: StableGraph::new(),
            index: IndexMap::new(),
            lemmas: LemmaGraph::new(),
            embeddings: EmbeddingCache::new(),
            diff: DiffTracker::new(),
            window: VecDeque::new(),
            sentence: Vec::new(),
            paragraph: Vec::new(),
            tick: 0,
            config,
            collab,
        }
    }

    /// Replaces this instance with a fresh one built from the same
    /// configuration and collaborators.
    pub fn reset(&mut self) {
        *self = WordGraph::new(self.config, self.collab.clone());
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collab
    }

    /// Current logical clock value.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Copy of the sliding window, oldest first.
    pub fn window(&self) -> Vec<String> {
        self.window.iter().cloned().collect()
    }

    /// Copy of the tokens buffered since the last sentence boundary.
    pub fn sentence_buffer(&self) -> Vec<String> {
        self.sentence.clone()
    }

    /// Copy of the tokens buffered since the last paragraph boundary.
    pub fn paragraph_buffer(&self) -> Vec<String> {
        self.paragraph.clone()
    }

    pub fn lemma_graph(&self) -> &LemmaGraph {
        &self.lemmas
    }

    pub fn embedding_cache(&self) -> &EmbeddingCache {
        &self.embeddings
    }

    pub fn word_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of word edges of both kinds, counting each direction.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Looks up a word node.
    pub fn get_word(&self, word: &str) -> Option<&WordNode> {
        let idx = *self.index.get(word)?;
        self.graph.node_weight(idx)
    }

    /// All word nodes in creation order.
    pub fn words(&self) -> impl Iterator<Item = &WordNode> + '_ {
        self.index
            .values()
            .filter_map(move |&idx| self.graph.node_weight(idx))
    }

    /// Looks up the edge of `kind` from `source` to `target`.
    pub fn edge(&self, source: &str, target: &str, kind: EdgeKind) -> Option<&WordEdge> {
        let from = *self.index.get(source)?;
        let to = *self.index.get(target)?;
        let edge = self.find_edge(from, to, kind)?;
        self.graph.edge_weight(edge)
    }

    pub fn edge_weight(&self, source: &str, target: &str, kind: EdgeKind) -> Option<f32> {
        self.edge(source, target, kind).map(|e| e.weight)
    }

    /// Incoming and outgoing edges of `word`, ordered by creation tick.
    ///
    /// A neighbour linked by both a semantic and a temporal edge appears
    /// twice. An unknown word yields empty lists.
    pub fn incident_edges(&self, word: &str) -> IncidentEdges {
        let Some(&idx) = self.index.get(word) else {
            return IncidentEdges::default();
        };
        IncidentEdges {
            incoming: self.endpoint_pairs(idx, Direction::Incoming),
            outgoing: self.endpoint_pairs(idx, Direction::Outgoing),
        }
    }

    fn endpoint_pairs(&self, idx: NodeIndex<u32>, dir: Direction) -> Vec<(String, String)> {
        let mut edges: Vec<(u64, EdgeIndex<u32>)> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| (e.weight().creation_tick, e.id()))
            .collect();
        edges.sort();
        edges
            .into_iter()
            .filter_map(|(_, edge)| {
                let (a, b) = self.graph.edge_endpoints(edge)?;
                Some((self.graph[a].word.clone(), self.graph[b].word.clone()))
            })
            .collect()
    }

    fn find_edge(
        &self,
        from: NodeIndex<u32>,
        to: NodeIndex<u32>,
        kind: EdgeKind,
    ) -> Option<EdgeIndex<u32>> {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .find(|e| e.target() == to && e.weight().kind == kind)
            .map(|e| e.id())
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Full, self-consistent state of both graphs.
    pub fn snapshot(&self) -> Snapshot {
        let mut edges: Vec<EdgeView> = self
            .graph
            .edge_indices()
            .filter_map(|idx| self.edge_view(idx))
            .collect();
        edges.sort_by_key(|e| e.creation_tick);

        Snapshot {
            tick: self.tick,
            window: self.window(),
            nodes: self.words().cloned().collect(),
            edges,
            lemma_nodes: self.lemmas.nodes().cloned().collect(),
            lemma_edges: self.lemmas.edge_views(),
        }
    }

    fn edge_view(&self, idx: EdgeIndex<u32>) -> Option<EdgeView> {
        let (a, b) = self.graph.edge_endpoints(idx)?;
        let edge = self.graph.edge_weight(idx)?;
        Some(EdgeView {
            source: self.graph[a].word.clone(),
            target: self.graph[b].word.clone(),
            weight: edge.weight,
            kind: edge.kind.into(),
            creation_tick: edge.creation_tick,
        })
    }

    /// Mutation records accumulated since the last clear. Does not clear.
    pub fn drain_diff(&self) -> DiffSet {
        self.diff.drain()
    }

    pub fn clear_diff(&mut self) {
        self.diff.clear();
    }

    /// Drains and clears the diff in one step.
    pub fn take_diff(&mut self) -> DiffSet {
        self.diff.take()
    }

    // -----------------------------------------------------------------------
    // Node store
    // -----------------------------------------------------------------------

    /// Records one occurrence of `word`, creating the node if needed.
    ///
    /// The lemma form is resolved only when the node is created. A lemmatizer
    /// failure leaves the store unchanged.
    pub fn touch_word(&mut self, word: &str) -> Result<(), GraphError> {
        self.touch_word_index(word).map(|_| ())
    }

    fn touch_word_index(&mut self, word: &str) -> Result<NodeIndex<u32>, GraphError> {
        if let Some(&idx) = self.index.get(word) {
            let node = &mut self.graph[idx];
            node.occurrence_count += 1;
            self.diff.record(DiffRecord::NodeCountChanged {
                id: word.to_string(),
                occurrence_count: node.occurrence_count,
            });
            return Ok(idx);
        }

        let lemma = self
            .collab
            .lemmatizer
            .lemmatize(word)?
            .into_iter()
            .next()
            .unwrap_or_else(|| word.to_string());
        let node = WordNode::new(word, lemma);
        self.diff.record(DiffRecord::NodeCreated { node: node.clone() });
        let idx = self.graph.add_node(node);
        self.index.insert(word.to_string(), idx);
        Ok(idx)
    }

    /// Returns the node for `word`, touching it into existence if absent.
    fn ensure_word(&mut self, word: &str) -> Result<NodeIndex<u32>, GraphError> {
        match self.index.get(word) {
            Some(&idx) => Ok(idx),
            None => self.touch_word_index(word),
        }
    }

    /// Removes one occurrence of `word`. At zero the node and every incident
    /// edge are removed. Unknown words are ignored.
    pub fn decrement_word(&mut self, word: &str) {
        let Some(&idx) = self.index.get(word) else {
            return;
        };
        let node = &mut self.graph[idx];
        node.occurrence_count = node.occurrence_count.saturating_sub(1);
        if node.occurrence_count == 0 {
            self.remove_word_node(idx);
        } else {
            self.diff.record(DiffRecord::NodeCountChanged {
                id: word.to_string(),
                occurrence_count: node.occurrence_count,
            });
        }
    }

    /// Removes a node outright, recording one `EdgeRemoved` per incident edge
    /// before the `NodeRemoved` record.
    pub(crate) fn remove_word_node(&mut self, idx: NodeIndex<u32>) {
        let mut incident: Vec<EdgeIndex<u32>> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        incident.sort();
        incident.dedup();

        for edge in incident {
            if let Some(view) = self.edge_view(edge) {
                self.diff.record(DiffRecord::EdgeRemoved {
                    source: view.source,
                    target: view.target,
                    kind: view.kind,
                });
            }
        }

        if let Some(node) = self.graph.remove_node(idx) {
            self.index.shift_remove(&node.word);
            self.diff.record(DiffRecord::NodeRemoved { id: node.word });
        }

        #[cfg(debug_assertions)]
        self.assert_consistency();
    }

    pub(crate) fn node_index(&self, word: &str) -> Option<NodeIndex<u32>> {
        self.index.get(word).copied()
    }

    // -----------------------------------------------------------------------
    // Semantic edge manager
    // -----------------------------------------------------------------------

    /// Proposes a symmetric semantic edge between `u` and `v`.
    ///
    /// Self-pairs are ignored. Both endpoints are touched into existence if
    /// missing. A weight below the configured threshold changes no edge;
    /// otherwise both directions are created or overwritten with `weight`.
    /// When `update_lemma` is set, the cosine similarity of the two lemma
    /// embeddings is max-merged into the lemma graph.
    pub fn propose_semantic_edge(
        &mut self,
        u: &str,
        v: &str,
        weight: f32,
        update_lemma: bool,
    ) -> Result<(), GraphError> {
        if u == v {
            return Ok(());
        }
        let ui = self.ensure_word(u)?;
        let vi = self.ensure_word(v)?;

        // NaN never passes the gate.
        if !(weight >= self.config.semantic_threshold) {
            return Ok(());
        }

        // Resolve the lemma weight first so an encoder failure leaves the
        // word edges untouched.
        let lemma_update = if update_lemma {
            let lu = self.graph[ui].lemma_form.clone();
            let lv = self.graph[vi].lemma_form.clone();
            self.embeddings
                .fill(self.collab.encoder.as_ref(), [lu.as_str(), lv.as_str()])?;
            let similarity = self.embeddings.similarity(&lu, &lv).unwrap_or(0.0);
            Some((lu, lv, similarity))
        } else {
            None
        };

        self.upsert_semantic(ui, vi, weight);
        self.upsert_semantic(vi, ui, weight);

        if let Some((lu, lv, similarity)) = lemma_update {
            self.lemmas
                .propose_edge(&lu, &lv, similarity, self.tick, &mut self.diff);
        }
        Ok(())
    }

    fn upsert_semantic(&mut self, from: NodeIndex<u32>, to: NodeIndex<u32>, weight: f32) {
        match self.find_edge(from, to, EdgeKind::Semantic) {
            Some(edge) => self.overwrite_weight(edge, weight),
            None => {
                let edge = self
                    .graph
                    .add_edge(from, to, WordEdge::semantic(weight, self.tick));
                self.record_created(edge);
            }
        }
    }

    /// Overwrites the weight of an existing semantic edge, in both
    /// directions.
    pub fn set_semantic_edge(&mut self, u: &str, v: &str, weight: f32) -> Result<(), GraphError> {
        let forward = self.require_edge(u, v, EdgeKind::Semantic)?;
        self.overwrite_weight(forward, weight);
        if let Some((ui, vi)) = self.graph.edge_endpoints(forward) {
            if let Some(mirror) = self.find_edge(vi, ui, EdgeKind::Semantic) {
                self.overwrite_weight(mirror, weight);
            }
        }

        #[cfg(debug_assertions)]
        self.assert_consistency();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Temporal edge manager
    // -----------------------------------------------------------------------

    /// Proposes a directed temporal edge. An existing edge only ever takes
    /// a strictly greater weight.
    pub fn propose_temporal_edge(&mut self, u: &str, v: &str, weight: f32) -> Result<(), GraphError> {
        let ui = self.ensure_word(u)?;
        let vi = self.ensure_word(v)?;

        match self.find_edge(ui, vi, EdgeKind::Temporal) {
            Some(edge) => {
                if weight > self.graph[edge].weight {
                    self.overwrite_weight(edge, weight);
                }
            }
            None => {
                let edge = self
                    .graph
                    .add_edge(ui, vi, WordEdge::temporal(weight, self.tick));
                self.record_created(edge);
            }
        }
        Ok(())
    }

    /// Overwrites the weight of an existing temporal edge.
    pub fn set_temporal_edge(&mut self, u: &str, v: &str, weight: f32) -> Result<(), GraphError> {
        let edge = self.require_edge(u, v, EdgeKind::Temporal)?;
        self.overwrite_weight(edge, weight);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lemma graph
    // -----------------------------------------------------------------------

    /// Max-merges `weight` into the lemma edge `l1`–`l2`.
    pub fn propose_lemma_edge(&mut self, l1: &str, l2: &str, weight: f32) {
        self.lemmas
            .propose_edge(l1, l2, weight, self.tick, &mut self.diff);
    }

    /// Overwrites the weight of an existing lemma edge.
    pub fn set_lemma_edge(&mut self, l1: &str, l2: &str, weight: f32) -> Result<(), GraphError> {
        self.lemmas.set_edge(l1, l2, weight, &mut self.diff)
    }

    // -----------------------------------------------------------------------
    // Shared edge helpers
    // -----------------------------------------------------------------------

    fn require_edge(&self, u: &str, v: &str, kind: EdgeKind) -> Result<EdgeIndex<u32>, GraphError> {
        self.index
            .get(u)
            .zip(self.index.get(v))
            .and_then(|(&ui, &vi)| self.find_edge(ui, vi, kind))
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: u.to_string(),
                to: v.to_string(),
                kind: kind.into(),
            })
    }

    fn overwrite_weight(&mut self, edge: EdgeIndex<u32>, weight: f32) {
        if self.graph[edge].weight == weight {
            return;
        }
        self.graph[edge].weight = weight;
        if let Some(view) = self.edge_view(edge) {
            self.diff.record(DiffRecord::EdgeWeightChanged {
                source: view.source,
                target: view.target,
                kind: view.kind,
                weight,
            });
        }
    }

    fn record_created(&mut self, edge: EdgeIndex<u32>) {
        if let Some(view) = self.edge_view(edge) {
            self.diff.record(DiffRecord::EdgeCreated { edge: view });
        }
    }

    /// Removes the edge of `kind` from `u` to `v`, if present.
    pub(crate) fn remove_edge(&mut self, u: &str, v: &str, kind: EdgeKind) -> bool {
        let Ok(edge) = self.require_edge(u, v, kind) else {
            return false;
        };
        self.graph.remove_edge(edge);
        self.diff.record(DiffRecord::EdgeRemoved {
            source: u.to_string(),
            target: v.to_string(),
            kind: EdgeType::from(kind),
        });
        true
    }

    // -----------------------------------------------------------------------
    // Debug consistency assertion
    // -----------------------------------------------------------------------

    /// Verifies the index matches the graph and that every semantic edge has
    /// a mirror of identical weight.
    ///
    /// Only called in debug builds (via `cfg(debug_assertions)`).
    #[cfg(debug_assertions)]
    pub(crate) fn assert_consistency(&self) {
        assert_eq!(
            self.index.len(),
            self.graph.node_count(),
            "word index out of sync with graph"
        );
        for (word, &idx) in &self.index {
            let node = &self.graph[idx];
            assert_eq!(&node.word, word, "index points at the wrong node");
            assert!(node.occurrence_count > 0, "live node '{word}' has zero count");
        }
        for edge in self.graph.edge_indices() {
            let weight = &self.graph[edge];
            if weight.kind != EdgeKind::Semantic {
                continue;
            }
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let mirror = self
                .find_edge(b, a, EdgeKind::Semantic)
                .map(|m| self.graph[m].weight);
            assert_eq!(
                mirror,
                Some(weight.weight),
                "semantic edge {} -> {} lacks a matching mirror",
                self.graph[a].word,
                self.graph[b].word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{graph_with, StubEncoder};

    fn graph() -> WordGraph {
        graph_with(StubEncoder::new(), GraphConfig::default())
    }

    #[test]
    fn touch_creates_then_increments() {
        let mut g = graph();
        g.touch_word("apples").unwrap();
        g.touch_word("apples").unwrap();

        let node = g.get_word("apples").unwrap();
        assert_eq!(node.occurrence_count, 2);
        assert_eq!(node.lemma_form, "apple");
        assert_eq!(g.word_count(), 1);
    }

    #[test]
    fn touch_then_decrement_to_zero_removes() {
        let mut g = graph();
        g.touch_word("x").unwrap();
        g.touch_word("x").unwrap();
        g.decrement_word("x");
        assert_eq!(g.get_word("x").unwrap().occurrence_count, 1);
        g.decrement_word("x");
        assert!(g.get_word("x").is_none());
        assert!(!g.contains_word("x"));
    }

    #[test]
    fn decrement_absent_is_noop() {
        let mut g = graph();
        g.decrement_word("ghost");
        assert_eq!(g.word_count(), 0);
        assert!(g.drain_diff().is_empty());
    }

    #[test]
    fn node_removal_drops_all_incident_edges() {
        let mut g = graph();
        g.propose_semantic_edge("cat", "kitten", 0.9, false).unwrap();
        g.propose_temporal_edge("cat", "kitten", 0.6).unwrap();
        g.propose_temporal_edge("dog", "cat", 0.6).unwrap();
        assert_eq!(g.edge_count(), 4);

        g.clear_diff();
        g.decrement_word("cat");

        assert!(!g.contains_word("cat"));
        assert_eq!(g.edge_count(), 0);
        assert!(g.contains_word("kitten"));
        assert!(g.contains_word("dog"));

        let records = g.drain_diff().records;
        let removed_edges = records
            .iter()
            .filter(|r| matches!(r, DiffRecord::EdgeRemoved { .. }))
            .count();
        assert_eq!(removed_edges, 4);
        assert_eq!(
            records.last(),
            Some(&DiffRecord::NodeRemoved { id: "cat".into() })
        );
    }

    #[test]
    fn semantic_self_pair_is_ignored() {
        let mut g = graph();
        g.propose_semantic_edge("same", "same", 1.0, true).unwrap();
        assert_eq!(g.word_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn semantic_edge_is_symmetric_and_overwritten() {
        let mut g = graph();
        g.propose_semantic_edge("a", "b", 0.9, false).unwrap();
        assert_eq!(g.edge_weight("a", "b", EdgeKind::Semantic), Some(0.9));
        assert_eq!(g.edge_weight("b", "a", EdgeKind::Semantic), Some(0.9));

        // Overwrite, not max: a lower above-threshold weight replaces.
        g.propose_semantic_edge("b", "a", 0.6, false).unwrap();
        assert_eq!(g.edge_weight("a", "b", EdgeKind::Semantic), Some(0.6));
        assert_eq!(g.edge_weight("b", "a", EdgeKind::Semantic), Some(0.6));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn semantic_below_threshold_touches_nodes_only() {
        let mut g = graph();
        g.propose_semantic_edge("a", "b", 0.49, false).unwrap();
        assert!(g.contains_word("a"));
        assert!(g.contains_word("b"));
        assert_eq!(g.edge_count(), 0);

        g.propose_semantic_edge("a", "b", 0.8, false).unwrap();
        g.propose_semantic_edge("a", "b", 0.1, false).unwrap();
        assert_eq!(g.edge_weight("a", "b", EdgeKind::Semantic), Some(0.8));
    }

    #[test]
    fn semantic_proposal_does_not_increment_existing_nodes() {
        let mut g = graph();
        g.touch_word("a").unwrap();
        g.propose_semantic_edge("a", "b", 0.9, false).unwrap();
        assert_eq!(g.get_word("a").unwrap().occurrence_count, 1);
        assert_eq!(g.get_word("b").unwrap().occurrence_count, 1);
    }

    #[test]
    fn semantic_proposal_updates_lemma_graph() {
        let encoder = StubEncoder::new()
            .with("run", [1.0, 0.0])
            .with("walk", [1.0, 1.0]);
        let mut g = graph_with(encoder, GraphConfig::default());

        g.propose_semantic_edge("runs", "walks", 0.9, true).unwrap();

        let lemma_weight = g.lemma_graph().edge_weight("run", "walk").unwrap();
        assert!((lemma_weight - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
        assert!(g.embedding_cache().contains("run"));
        assert!(g.embedding_cache().contains("walk"));
    }

    #[test]
    fn failed_lemma_encoding_leaves_edges_untouched() {
        let mut g = graph_with(StubEncoder::strict(), GraphConfig::default());
        let err = g.propose_semantic_edge("a", "b", 0.9, true).unwrap_err();
        assert!(matches!(err, GraphError::Encode(_)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn set_semantic_edge_requires_existing_edge() {
        let mut g = graph();
        let err = g.set_semantic_edge("a", "b", 0.7).unwrap_err();
        assert!(matches!(
            err,
            GraphError::EdgeNotFound {
                kind: EdgeType::Semantic,
                ..
            }
        ));

        g.propose_semantic_edge("a", "b", 0.9, false).unwrap();
        g.set_semantic_edge("a", "b", 0.7).unwrap();
        assert_eq!(g.edge_weight("b", "a", EdgeKind::Semantic), Some(0.7));
    }

    #[test]
    fn temporal_edge_keeps_maximum() {
        let mut g = graph();
        for w in [0.3, 0.7, 0.2] {
            g.propose_temporal_edge("a", "b", w).unwrap();
        }
        assert_eq!(g.edge_weight("a", "b", EdgeKind::Temporal), Some(0.7));
        assert_eq!(g.edge_weight("b", "a", EdgeKind::Temporal), None);
    }

    #[test]
    fn temporal_edge_records_creation_tick() {
        let mut g = graph();
        g.tick = 7;
        g.propose_temporal_edge("a", "b", 0.5).unwrap();
        g.tick = 9;
        g.propose_temporal_edge("a", "b", 0.6).unwrap();
        assert_eq!(g.edge("a", "b", EdgeKind::Temporal).unwrap().creation_tick, 7);
    }

    #[test]
    fn set_temporal_edge_overwrites_even_downward() {
        let mut g = graph();
        assert!(g.set_temporal_edge("a", "b", 0.1).is_err());
        g.propose_temporal_edge("a", "b", 0.9).unwrap();
        g.set_temporal_edge("a", "b", 0.1).unwrap();
        assert_eq!(g.edge_weight("a", "b", EdgeKind::Temporal), Some(0.1));
    }

    #[test]
    fn incident_edges_lists_each_edge_instance() {
        let mut g = graph();
        g.propose_semantic_edge("a", "b", 0.9, false).unwrap();
        g.propose_temporal_edge("a", "b", 0.6).unwrap();

        let edges = g.incident_edges("a");
        assert_eq!(
            edges.outgoing,
            vec![("a".to_string(), "b".to_string()); 2]
        );
        assert_eq!(edges.incoming, vec![("b".to_string(), "a".to_string())]);

        assert_eq!(g.incident_edges("nobody"), IncidentEdges::default());
    }

    #[test]
    fn lemma_edges_via_graph() {
        let mut g = graph();
        g.propose_lemma_edge("x", "y", 0.2);
        g.propose_lemma_edge("y", "x", 0.4);
        assert_eq!(g.lemma_graph().edge_weight("x", "y"), Some(0.4));
        g.set_lemma_edge("x", "y", 0.05).unwrap();
        assert_eq!(g.lemma_graph().edge_weight("x", "y"), Some(0.05));
        assert!(g.set_lemma_edge("x", "z", 0.5).is_err());
    }

    #[test]
    fn snapshot_reflects_graph_and_ignores_diff() {
        let mut g = graph();
        g.propose_semantic_edge("a", "b", 0.9, false).unwrap();
        g.clear_diff();

        let snap = g.snapshot();
        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.edges.len(), 2);
        assert!(snap.edge("a", "b", EdgeType::Semantic).is_some());
        assert!(snap.edge("b", "a", EdgeType::Semantic).is_some());
        assert!(g.drain_diff().is_empty());
    }

    #[test]
    fn diff_records_mutations_in_order() {
        let mut g = graph();
        g.touch_word("a").unwrap();
        g.touch_word("a").unwrap();
        g.propose_temporal_edge("a", "b", 0.5).unwrap();
        g.propose_temporal_edge("a", "b", 0.4).unwrap(); // no change

        let ops: Vec<&'static str> = g
            .drain_diff()
            .iter()
            .map(|r| match r {
                DiffRecord::NodeCreated { .. } => "nodeCreated",
                DiffRecord::NodeCountChanged { .. } => "nodeCountChanged",
                DiffRecord::EdgeCreated { .. } => "edgeCreated",
                _ => "other",
            })
            .collect();
        assert_eq!(
            ops,
            ["nodeCreated", "nodeCountChanged", "nodeCreated", "edgeCreated"]
        );
    }

    #[test]
    fn reset_restores_empty_state() {
        let mut g = graph();
        g.propose_temporal_edge("a", "b", 0.5).unwrap();
        g.tick = 4;
        g.reset();
        assert_eq!(g.word_count(), 0);
        assert_eq!(g.tick(), 0);
        assert!(g.drain_diff().is_empty());
        assert_eq!(g.config().window_capacity, 30);
    }
}
