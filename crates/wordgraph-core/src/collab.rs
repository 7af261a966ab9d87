//! Collaborator contracts the engine depends on.
//!
//! Segmentation, lemmatization, and embedding are external capabilities.
//! They are injected at construction through [`Collaborators`] rather than
//! held as process-wide singletons, so tests can supply deterministic stubs
//! and several graph instances can share one (immutable) model.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, LemmatizeError};
use crate::text::{HashingEncoder, SimpleSegmenter, SuffixLemmatizer};

/// A dense embedding vector.
pub type Embedding = Vec<f32>;

/// Maps tokens to embedding vectors. Must be deterministic for a given model.
pub trait Encoder: Send + Sync {
    /// Encodes a single token.
    fn encode(&self, token: &str) -> Result<Embedding, EncodeError>;

    /// Encodes several tokens in one round-trip.
    ///
    /// The default implementation calls [`encode`](Self::encode) per token;
    /// model-backed encoders should override it.
    fn encode_batch(&self, tokens: &[String]) -> Result<HashMap<String, Embedding>, EncodeError> {
        tokens
            .iter()
            .map(|token| Ok((token.clone(), self.encode(token)?)))
            .collect()
    }
}

/// Resolves a word to its dictionary forms. Only the first form is used.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> Result<Vec<String>, LemmatizeError>;
}

/// Splits raw text into lowercase tokens plus boundary markers.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Segmented;
}

/// Output of a [`Segmenter`]: tokens and the indices of the last token of
/// every sentence and paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmented {
    pub tokens: Vec<String>,
    pub sentence_ends: Vec<usize>,
    #[serde(default)]
    pub paragraph_ends: Vec<usize>,
}

impl Segmented {
    /// Tokens with no sentence or paragraph boundaries.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Segmented {
            tokens: tokens.into_iter().map(Into::into).collect(),
            sentence_ends: Vec::new(),
            paragraph_ends: Vec::new(),
        }
    }

    /// Sets the sentence boundary indices.
    pub fn with_sentence_ends(mut self, ends: impl Into<Vec<usize>>) -> Self {
        self.sentence_ends = ends.into();
        self
    }

    /// Sets the paragraph boundary indices.
    pub fn with_paragraph_ends(mut self, ends: impl Into<Vec<usize>>) -> Self {
        self.paragraph_ends = ends.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The set of external capabilities a graph instance is built with.
#[derive(Clone)]
pub struct Collaborators {
    pub encoder: Arc<dyn Encoder>,
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub segmenter: Arc<dyn Segmenter>,
}

impl Collaborators {
    pub fn new(
        encoder: Arc<dyn Encoder>,
        lemmatizer: Arc<dyn Lemmatizer>,
        segmenter: Arc<dyn Segmenter>,
    ) -> Self {
        Collaborators {
            encoder,
            lemmatizer,
            segmenter,
        }
    }

    /// The dependency-free defaults: [`HashingEncoder`] with `dim`
    /// dimensions, [`SuffixLemmatizer`], and [`SimpleSegmenter`].
    pub fn with_defaults(dim: usize) -> Self {
        Collaborators {
            encoder: Arc::new(HashingEncoder::new(dim)),
            lemmatizer: Arc::new(SuffixLemmatizer::new()),
            segmenter: Arc::new(SimpleSegmenter),
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::with_defaults(HashingEncoder::DEFAULT_DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthEncoder;

    impl Encoder for LengthEncoder {
        fn encode(&self, token: &str) -> Result<Embedding, EncodeError> {
            Ok(vec![token.len() as f32])
        }
    }

    #[test]
    fn default_batch_encodes_each_token() {
        let batch = LengthEncoder
            .encode_batch(&["a".to_string(), "abc".to_string()])
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch["abc"], vec![3.0]);
    }

    #[test]
    fn segmented_builders() {
        let seg = Segmented::from_tokens(["the", "cat"])
            .with_sentence_ends([1])
            .with_paragraph_ends([1]);
        assert_eq!(seg.tokens, vec!["the".to_string(), "cat".to_string()]);
        assert_eq!(seg.sentence_ends, vec![1]);
        assert_eq!(seg.paragraph_ends, vec![1]);
        assert!(!seg.is_empty());
    }
}
