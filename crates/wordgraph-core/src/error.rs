//! Error types for wordgraph-core.
//!
//! Uses `thiserror` for structured, matchable variants. Graph policy outcomes
//! (semantic self-pairs, sub-threshold semantic proposals) are not errors; only direct
//! edge overwrites on missing edges, bad enrichment requests, and collaborator
//! failures surface here.

use thiserror::Error;

use crate::edge::EdgeType;

/// Failure reported by an [`Encoder`](crate::collab::Encoder).
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The embedding backend failed.
    #[error("encoder backend failure: {reason}")]
    Backend { reason: String },

    /// A batch call returned without an embedding for a requested token.
    #[error("encoder returned no embedding for token '{token}'")]
    MissingEmbedding { token: String },
}

/// Failure reported by a [`Lemmatizer`](crate::collab::Lemmatizer).
#[derive(Debug, Error)]
#[error("lemmatizer failure for '{word}': {reason}")]
pub struct LemmatizeError {
    pub word: String,
    pub reason: String,
}

/// Errors produced by the word graph engine.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A direct `set_*_edge` call targeted an edge that does not exist.
    #[error("{kind} edge not found: '{from}' -> '{to}'")]
    EdgeNotFound {
        from: String,
        to: String,
        kind: EdgeType,
    },

    /// Enrichment was requested with an unrecognised buffer selector.
    #[error("invalid enrichment mode: '{mode}' (expected 'sentence' or 'paragraph')")]
    InvalidMode { mode: String },

    /// Enrichment was invoked without any tokens to work on.
    #[error("enrichment requires at least one token")]
    EmptyInput,

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Lemmatize(#[from] LemmatizeError),
}
