//! Write-once token embedding memo.
//!
//! [`EmbeddingCache`] is filled through batch encoder calls so that each
//! pipeline step costs at most one encoder round-trip. An entry, once written,
//! is never replaced.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::collab::{Embedding, Encoder};
use crate::error::EncodeError;

/// Token → embedding memo owned by one graph instance.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingCache {
    entries: HashMap<String, Embedding>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    /// Stores an embedding unless one is already cached for `token`.
    ///
    /// Returns `true` if the entry was written.
    pub fn insert(&mut self, token: impl Into<String>, embedding: Embedding) -> bool {
        let token = token.into();
        if self.entries.contains_key(&token) {
            return false;
        }
        self.entries.insert(token, embedding);
        true
    }

    /// Returns the distinct tokens from `tokens` that are not cached yet,
    /// in first-seen order.
    pub fn missing<'a, I>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: IndexSet<&str> = tokens
            .into_iter()
            .filter(|token| !self.entries.contains_key(*token))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Encodes every uncached token from `tokens` with a single batch call.
    ///
    /// Nothing is written unless the encoder returned an embedding for every
    /// requested token. Returns the number of new entries.
    pub fn fill<'a, I>(&mut self, encoder: &dyn Encoder, tokens: I) -> Result<usize, EncodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let missing = self.missing(tokens);
        if missing.is_empty() {
            return Ok(0);
        }

        let mut batch = encoder.encode_batch(&missing)?;
        if let Some(absent) = missing.iter().find(|token| !batch.contains_key(*token)) {
            return Err(EncodeError::MissingEmbedding {
                token: absent.clone(),
            });
        }

        for token in &missing {
            if let Some(embedding) = batch.remove(token) {
                self.entries.insert(token.clone(), embedding);
            }
        }
        tracing::trace!(count = missing.len(), "cached new embeddings");
        Ok(missing.len())
    }

    /// Cosine similarity between two cached tokens, if both are present.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        Some(cosine_similarity(self.get(a)?, self.get(b)?))
    }
}

/// Cosine similarity of two vectors.
///
/// Zero-magnitude or empty inputs yield `0.0`. Vectors of unequal length
/// are compared over their common prefix.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
