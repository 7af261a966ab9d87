//! Property tests for the graph invariants.

use std::collections::HashMap;

use proptest::prelude::*;
use wordgraph_core::{
    Collaborators, EdgeKind, EdgeType, GraphConfig, Segmented, WordGraph,
};

const WORDS: [&str; 5] = ["ant", "bee", "cow", "dog", "eel"];

fn graph(window_capacity: usize) -> WordGraph {
    WordGraph::new(
        GraphConfig::new(window_capacity, 0.5),
        Collaborators::default(),
    )
}

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(WORDS.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn occurrence_count_tracks_touches_minus_decrements(
        ops in prop::collection::vec((word(), any::<bool>()), 0..80)
    ) {
        let mut g = graph(30);
        let mut model: HashMap<&str, u32> = HashMap::new();

        for (w, touch) in ops {
            if touch {
                g.touch_word(w).unwrap();
                *model.entry(w).or_default() += 1;
            } else {
                g.decrement_word(w);
                if let Some(count) = model.get_mut(w) {
                    *count -= 1;
                    if *count == 0 {
                        model.remove(w);
                    }
                }
            }
        }

        for w in WORDS {
            let actual = g.get_word(w).map(|n| n.occurrence_count);
            prop_assert_eq!(actual, model.get(w).copied());
        }
    }

    #[test]
    fn semantic_edges_stay_symmetric(
        proposals in prop::collection::vec((word(), word(), 0.0f32..1.0), 0..40),
        overwrites in prop::collection::vec((word(), word(), 0.0f32..1.0), 0..10),
    ) {
        let mut g = graph(30);
        for (u, v, w) in proposals {
            g.propose_semantic_edge(u, v, w, false).unwrap();
        }
        for (u, v, w) in overwrites {
            let _ = g.set_semantic_edge(u, v, w);
        }
        g.decrement_word("cow");

        for edge in g.snapshot().edges.iter().filter(|e| e.kind == EdgeType::Semantic) {
            let mirror = g.edge_weight(&edge.target, &edge.source, EdgeKind::Semantic);
            prop_assert_eq!(mirror, Some(edge.weight));
        }
    }

    #[test]
    fn sub_threshold_proposals_change_nothing(
        first in 0.5f32..1.0,
        later in prop::collection::vec(0.0f32..0.5, 1..10),
    ) {
        let mut g = graph(30);
        g.propose_semantic_edge("ant", "bee", later[0], false).unwrap();
        prop_assert!(g.edge("ant", "bee", EdgeKind::Semantic).is_none());

        g.propose_semantic_edge("ant", "bee", first, false).unwrap();
        g.clear_diff();
        for w in later {
            g.propose_semantic_edge("bee", "ant", w, false).unwrap();
        }
        prop_assert_eq!(g.edge_weight("ant", "bee", EdgeKind::Semantic), Some(first));
        prop_assert!(g.drain_diff().is_empty());
    }

    #[test]
    fn temporal_weight_is_running_max(weights in prop::collection::vec(0.0f32..1.0, 1..20)) {
        let mut g = graph(30);
        for &w in &weights {
            g.propose_temporal_edge("ant", "bee", w).unwrap();
        }
        let max = weights.iter().copied().fold(f32::MIN, f32::max);
        prop_assert_eq!(g.edge_weight("ant", "bee", EdgeKind::Temporal), Some(max));
    }

    #[test]
    fn lemma_weight_is_running_max(
        weights in prop::collection::vec((any::<bool>(), 0.0f32..1.0), 1..20)
    ) {
        let mut g = graph(30);
        for &(flip, w) in &weights {
            if flip {
                g.propose_lemma_edge("run", "walk", w);
            } else {
                g.propose_lemma_edge("walk", "run", w);
            }
        }
        let max = weights.iter().map(|&(_, w)| w).fold(f32::MIN, f32::max);
        prop_assert_eq!(g.lemma_graph().edge_weight("run", "walk"), Some(max));
    }

    #[test]
    fn window_holds_most_recent_tokens(
        capacity in 0usize..8,
        tokens in prop::collection::vec(word(), 0..30),
    ) {
        let mut g = graph(capacity);
        g.ingest(&Segmented::from_tokens(tokens.iter().copied()), false).unwrap();

        let window = g.window();
        prop_assert!(window.len() <= capacity);
        let keep = capacity.min(tokens.len());
        let expected: Vec<String> = tokens[tokens.len() - keep..]
            .iter()
            .map(|t| t.to_string())
            .collect();
        prop_assert_eq!(window, expected);
        prop_assert_eq!(g.tick(), tokens.len() as u64);
    }

    #[test]
    fn clear_then_drain_is_empty(tokens in prop::collection::vec(word(), 0..20)) {
        let mut g = graph(30);
        g.ingest(&Segmented::from_tokens(tokens.iter().copied()), false).unwrap();
        g.clear_diff();
        prop_assert!(g.drain_diff().is_empty());
    }
}
