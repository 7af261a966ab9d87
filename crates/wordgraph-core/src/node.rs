//! Node payloads for both graph layers.
//!
//! [`WordNode`] is a frequency-counted word identity whose lemma is resolved
//! exactly once, when the node is created. [`LemmaNode`] carries only its
//! lemma string.

use serde::{Deserialize, Serialize};

/// A word in the word graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordNode {
    #[serde(rename = "id")]
    pub word: String,
    /// Number of live occurrences. A node whose count reaches zero is removed.
    pub occurrence_count: u32,
    /// First lemma returned by the lemmatizer at creation time.
    pub lemma_form: String,
}

impl WordNode {
    /// Creates a node seen once.
    pub fn new(word: impl Into<String>, lemma_form: impl Into<String>) -> Self {
        WordNode {
            word: word.into(),
            occurrence_count: 1,
            lemma_form: lemma_form.into(),
        }
    }
}

/// A lemma in the lemma graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LemmaNode {
    #[serde(rename = "id")]
    pub lemma: String,
}
