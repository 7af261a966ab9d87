//! The derived lemma graph.
//!
//! An undirected graph keyed by lemma strings, kept in its own node and edge
//! namespace. It is only written as a side effect of semantic edge proposals
//! on the word graph. Edge weights are max-merged, so they never decrease
//! under proposals.

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;

use crate::diff::{DiffRecord, DiffTracker};
use crate::edge::{EdgeType, LemmaEdge};
use crate::error::GraphError;
use crate::node::LemmaNode;
use crate::snapshot::EdgeView;

/// Undirected, max-merge weighted index over lemma pairs.
#[derive(Debug, Clone, Default)]
pub struct LemmaGraph {
    graph: StableGraph<LemmaNode, LemmaEdge, Undirected, u32>,
    index: IndexMap<String, NodeIndex<u32>>,
}

impl LemmaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.index.contains_key(lemma)
    }

    /// Weight of the edge between two lemmas, in either order.
    pub fn edge_weight(&self, l1: &str, l2: &str) -> Option<f32> {
        let a = *self.index.get(l1)?;
        let b = *self.index.get(l2)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).map(|e| e.weight)
    }

    /// Lemma nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &LemmaNode> + '_ {
        self.index
            .values()
            .filter_map(move |&idx| self.graph.node_weight(idx))
    }

    /// Wire form of every lemma edge.
    pub fn edge_views(&self) -> Vec<EdgeView> {
        self.graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                let edge = self.graph.edge_weight(idx)?;
                Some(EdgeView {
                    source: self.graph[a].lemma.clone(),
                    target: self.graph[b].lemma.clone(),
                    weight: edge.weight,
                    kind: EdgeType::Lemma,
                    creation_tick: edge.creation_tick,
                })
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    fn ensure_node(&mut self, lemma: &str, diff: &mut DiffTracker) -> NodeIndex<u32> {
        if let Some(&idx) = self.index.get(lemma) {
            return idx;
        }
        let idx = self.graph.add_node(LemmaNode {
            lemma: lemma.to_string(),
        });
        self.index.insert(lemma.to_string(), idx);
        diff.record(DiffRecord::LemmaNodeCreated {
            id: lemma.to_string(),
        });
        idx
    }

    /// Proposes a weight for the `l1`–`l2` edge.
    ///
    /// Creates both lemma nodes and the edge as needed; an existing edge keeps
    /// `max(existing, weight)`. Identical lemmas produce a self-loop on
    /// that lemma.
    pub fn propose_edge(
        &mut self,
        l1: &str,
        l2: &str,
        weight: f32,
        tick: u64,
        diff: &mut DiffTracker,
    ) {
        let a = self.ensure_node(l1, diff);
        let b = self.ensure_node(l2, diff);

        match self.graph.find_edge(a, b) {
            Some(edge) => {
                let current = self.graph[edge].weight;
                if weight > current {
                    self.graph[edge].weight = weight;
                    diff.record(DiffRecord::LemmaEdgeWeightChanged {
                        source: l1.to_string(),
                        target: l2.to_string(),
                        weight,
                    });
                }
            }
            None => {
                self.graph.add_edge(
                    a,
                    b,
                    LemmaEdge {
                        weight,
                        creation_tick: tick,
                    },
                );
                diff.record(DiffRecord::LemmaEdgeCreated {
                    edge: EdgeView {
                        source: l1.to_string(),
                        target: l2.to_string(),
                        weight,
                        kind: EdgeType::Lemma,
                        creation_tick: tick,
                    },
                });
            }
        }
    }

    /// Overwrites the weight of an existing lemma edge.
    pub fn set_edge(
        &mut self,
        l1: &str,
        l2: &str,
        weight: f32,
        diff: &mut DiffTracker,
    ) -> Result<(), GraphError> {
        let not_found = || GraphError::EdgeNotFound {
            from: l1.to_string(),
            to: l2.to_string(),
            kind: EdgeType::Lemma,
        };
        let a = *self.index.get(l1).ok_or_else(not_found)?;
        let b = *self.index.get(l2).ok_or_else(not_found)?;
        let edge = self.graph.find_edge(a, b).ok_or_else(not_found)?;

        if self.graph[edge].weight != weight {
            self.graph[edge].weight = weight;
            diff.record(DiffRecord::LemmaEdgeWeightChanged {
                source: l1.to_string(),
                target: l2.to_string(),
                weight,
            });
        }
        Ok(())
    }
}
