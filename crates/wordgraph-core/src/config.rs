//! Per-instance engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`WordGraph`](crate::graph::WordGraph).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphConfig {
    /// Maximum number of recent tokens kept in the sliding window. Default: 30.
    pub window_capacity: usize,
    /// Minimum similarity for a semantic edge to be created or updated.
    /// Default: 0.5.
    pub semantic_threshold: f32,
}

impl GraphConfig {
    pub const DEFAULT_WINDOW_CAPACITY: usize = 30;
    pub const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.5;

    pub fn new(window_capacity: usize, semantic_threshold: f32) -> Self {
        GraphConfig {
            window_capacity,
            semantic_threshold,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            window_capacity: Self::DEFAULT_WINDOW_CAPACITY,
            semantic_threshold: Self::DEFAULT_SEMANTIC_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.window_capacity, 30);
        assert_eq!(config.semantic_threshold, 0.5);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GraphConfig = serde_json::from_str(r#"{"windowCapacity": 5}"#).unwrap();
        assert_eq!(config, GraphConfig::new(5, 0.5));
    }
}
