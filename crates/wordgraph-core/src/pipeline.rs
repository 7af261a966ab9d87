//! Ingestion pipeline: the sliding window, boundary-triggered enrichment and
//! warm-up.
//!
//! Each ingested token goes through one pipeline step:
//!
//! 1. Touch the node and append the token to the window and both buffers,
//!    evicting the oldest window entries beyond capacity.
//! 2. Advance the clock.
//! 3. Encode every referenced token and lemma form that is not cached yet, in
//!    one batch call.
//! 4. Propose a semantic and a temporal edge from every earlier window entry
//!    to the new token. The temporal weight is `sigmoid((n - i) / n)` for
//!    window position `i`, so older entries get higher temporal weights.
//! 5. If the token closes a sentence or paragraph, run all-pairs semantic
//!    enrichment over that buffer and clear it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collab::Segmented;
use crate::edge::EdgeKind;
use crate::error::GraphError;
use crate::graph::WordGraph;

/// Which boundary buffer an enrichment pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferMode {
    Sentence,
    Paragraph,
}

impl fmt::Display for BufferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferMode::Sentence => write!(f, "sentence"),
            BufferMode::Paragraph => write!(f, "paragraph"),
        }
    }
}

impl FromStr for BufferMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentence" => Ok(BufferMode::Sentence),
            "paragraph" => Ok(BufferMode::Paragraph),
            other => Err(GraphError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Logistic function used to shape temporal weights.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Position in the pending sentence and paragraph boundary lists of one
/// ingest call. Each boundary only matches the next pending index.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BoundaryCursor {
    sentence: usize,
    paragraph: usize,
}

impl BoundaryCursor {
    fn hit(pos: &mut usize, ends: &[usize], idx: usize) -> bool {
        if ends.get(*pos) == Some(&idx) {
            *pos += 1;
            true
        } else {
            false
        }
    }
}

/// Tokens used by [`WordGraph::warm_up`]. The leading control character keeps
/// them out of anything a segmenter produces.
const WARM_UP_WORD: &str = "\u{1}warm-up";
const WARM_UP_PAIR: [&str; 2] = ["\u{1}warm-up-test", "\u{1}warm-up-exam"];

impl WordGraph {
    // -----------------------------------------------------------------------
    // Ingestion
    // -----------------------------------------------------------------------

    /// Feeds pre-segmented tokens through the pipeline.
    ///
    /// With `reset_window` the sliding window is emptied first; the sentence
    /// and paragraph buffers always carry over from earlier calls.
    pub fn ingest(&mut self, input: &Segmented, reset_window: bool) -> Result<(), GraphError> {
        tracing::debug!(
            tokens = input.tokens.len(),
            tick = self.tick,
            reset_window,
            "ingesting tokens"
        );
        if reset_window {
            self.window.clear();
        }
        let mut cursor = BoundaryCursor::default();
        for idx in 0..input.tokens.len() {
            self.ingest_token(input, idx, &mut cursor)?;
        }
        Ok(())
    }

    /// Segments `text` with the configured segmenter and ingests the result.
    pub fn ingest_text(&mut self, text: &str, reset_window: bool) -> Result<(), GraphError> {
        let input = self.collab.segmenter.segment(text);
        self.ingest(&input, reset_window)
    }

    /// Runs the full pipeline step for `input.tokens[idx]`, including any
    /// boundary enrichment it triggers.
    pub(crate) fn ingest_token(
        &mut self,
        input: &Segmented,
        idx: usize,
        cursor: &mut BoundaryCursor,
    ) -> Result<(), GraphError> {
        let Some(token) = input.tokens.get(idx) else {
            return Ok(());
        };
        self.step(token)?;

        if BoundaryCursor::hit(&mut cursor.sentence, &input.sentence_ends, idx) {
            self.enrich(BufferMode::Sentence)?;
        }
        if BoundaryCursor::hit(&mut cursor.paragraph, &input.paragraph_ends, idx) {
            self.enrich(BufferMode::Paragraph)?;
        }
        Ok(())
    }

    fn step(&mut self, token: &str) -> Result<(), GraphError> {
        self.touch_word(token)?;
        self.window.push_back(token.to_string());
        self.sentence.push(token.to_string());
        self.paragraph.push(token.to_string());
        while self.window.len() > self.config.window_capacity {
            self.window.pop_front();
        }
        self.tick += 1;

        let window: Vec<String> = self.window.iter().cloned().collect();
        let mut referenced = Vec::with_capacity(window.len() + 1);
        referenced.push(token.to_string());
        referenced.extend(window.iter().cloned());
        self.prefetch_embeddings(&referenced)?;

        // The new token occupies the last window slot.
        let n = window.len().saturating_sub(1);
        for (i, prev) in window.iter().take(n).enumerate() {
            let semantic = self.embeddings.similarity(prev, token).unwrap_or(0.0);
            let temporal = sigmoid((n - i) as f32 / n as f32);
            self.propose_semantic_edge(prev, token, semantic, true)?;
            self.propose_temporal_edge(prev, token, temporal)?;
        }
        Ok(())
    }

    /// Caches embeddings for `tokens` and the lemma forms of those that are
    /// already nodes, in one encoder call.
    fn prefetch_embeddings(&mut self, tokens: &[String]) -> Result<(), GraphError> {
        let lemmas: Vec<String> = tokens
            .iter()
            .filter_map(|t| self.get_word(t))
            .map(|node| node.lemma_form.clone())
            .collect();
        self.embeddings.fill(
            self.collab.encoder.as_ref(),
            tokens.iter().chain(&lemmas).map(String::as_str),
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Enrichment
    // -----------------------------------------------------------------------

    /// Runs an all-pairs semantic pass over the selected buffer, then clears
    /// it. Buffers with fewer than two tokens produce no proposals.
    pub fn enrich(&mut self, mode: BufferMode) -> Result<(), GraphError> {
        let tokens = match mode {
            BufferMode::Sentence => std::mem::take(&mut self.sentence),
            BufferMode::Paragraph => std::mem::take(&mut self.paragraph),
        };
        tracing::trace!(%mode, tokens = tokens.len(), "enriching buffer");
        self.enrich_pairs(&tokens)
    }

    /// Runs an all-pairs semantic pass over caller-supplied tokens. The
    /// boundary buffers are left alone.
    pub fn enrich_tokens(&mut self, tokens: &[String]) -> Result<(), GraphError> {
        if tokens.is_empty() {
            return Err(GraphError::EmptyInput);
        }
        self.enrich_pairs(tokens)
    }

    /// Segments `text` and enriches its tokens as one group.
    pub fn enrich_text(&mut self, text: &str) -> Result<(), GraphError> {
        let input = self.collab.segmenter.segment(text);
        self.enrich_tokens(&input.tokens)
    }

    fn enrich_pairs(&mut self, tokens: &[String]) -> Result<(), GraphError> {
        if tokens.len() < 2 {
            return Ok(());
        }
        self.prefetch_embeddings(tokens)?;

        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                let weight = self.embeddings.similarity(a, b).unwrap_or(0.0);
                self.propose_semantic_edge(a, b, weight, true)?;
            }
        }

        #[cfg(debug_assertions)]
        self.assert_consistency();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Warm-up
    // -----------------------------------------------------------------------

    /// Exercises the collaborators and every graph code path once, then
    /// restores the observable state.
    ///
    /// Afterwards nodes, edges, the lemma graph, the embedding cache, the
    /// clock and the diff are exactly as before the call.
    pub fn warm_up(&mut self) -> Result<(), GraphError> {
        let mark = self.diff.len();
        let preexisting: Vec<bool> = std::iter::once(WARM_UP_WORD)
            .chain(WARM_UP_PAIR)
            .map(|w| self.contains_word(w))
            .collect();

        let result = self.warm_up_cycle();

        for (word, existed) in std::iter::once(WARM_UP_WORD)
            .chain(WARM_UP_PAIR)
            .zip(preexisting)
        {
            if existed {
                continue;
            }
            if let Some(idx) = self.node_index(word) {
                self.remove_word_node(idx);
            }
        }
        self.diff.truncate(mark);

        tracing::debug!(ok = result.is_ok(), "warm-up finished");
        result
    }

    fn warm_up_cycle(&mut self) -> Result<(), GraphError> {
        let pair: Vec<String> = WARM_UP_PAIR.iter().map(|w| w.to_string()).collect();
        self.collab.lemmatizer.lemmatize(WARM_UP_WORD)?;
        self.collab.encoder.encode_batch(&pair)?;

        if !self.contains_word(WARM_UP_WORD) {
            self.touch_word(WARM_UP_WORD)?;
            self.decrement_word(WARM_UP_WORD);
        }

        let [a, b] = WARM_UP_PAIR;
        if !self.contains_word(a) && !self.contains_word(b) {
            self.propose_semantic_edge(a, b, 1.0, false)?;
            self.remove_edge(a, b, EdgeKind::Semantic);
            self.remove_edge(b, a, EdgeKind::Semantic);
            self.decrement_word(a);
            self.decrement_word(b);
        }
        Ok(())
    }
}
