//! Deterministic collaborators shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::collab::{Collaborators, Embedding, Encoder};
use crate::config::GraphConfig;
use crate::error::EncodeError;
use crate::graph::WordGraph;
use crate::text::{SimpleSegmenter, SuffixLemmatizer};

/// Table-driven encoder. Unknown tokens map to the zero vector, or fail when
/// the encoder is strict.
#[derive(Default)]
pub(crate) struct StubEncoder {
    table: HashMap<String, Embedding>,
    strict: bool,
    pub(crate) batches: Arc<AtomicUsize>,
}

impl StubEncoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn strict() -> Self {
        StubEncoder {
            strict: true,
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, token: &str, embedding: impl Into<Embedding>) -> Self {
        self.table.insert(token.to_string(), embedding.into());
        self
    }
}

impl Encoder for StubEncoder {
    fn encode(&self, token: &str) -> Result<Embedding, EncodeError> {
        match self.table.get(token) {
            Some(embedding) => Ok(embedding.clone()),
            None if self.strict => Err(EncodeError::Backend {
                reason: format!("no stub embedding for '{token}'"),
            }),
            None => Ok(vec![0.0, 0.0]),
        }
    }

    fn encode_batch(&self, tokens: &[String]) -> Result<HashMap<String, Embedding>, EncodeError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        tokens
            .iter()
            .map(|t| Ok((t.clone(), self.encode(t)?)))
            .collect()
    }
}

/// A graph using `encoder`, the suffix lemmatizer and the simple segmenter.
pub(crate) fn graph_with(encoder: StubEncoder, config: GraphConfig) -> WordGraph {
    let collab = Collaborators::new(
        Arc::new(encoder),
        Arc::new(SuffixLemmatizer::new()),
        Arc::new(SimpleSegmenter),
    );
    WordGraph::new(config, collab)
}
