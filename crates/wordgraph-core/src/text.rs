//! Dependency-free default collaborators.
//!
//! These make the engine usable without an external model runtime:
//! - [`SimpleSegmenter`]: word runs plus sentence/paragraph boundaries.
//! - [`SuffixLemmatizer`]: rule-based English suffix stripping.
//! - [`HashingEncoder`]: feature-hashed character trigram embeddings.
//!
//! All three are deterministic across runs and platforms.

use std::collections::HashMap;

use crate::collab::{Embedding, Encoder, Lemmatizer, Segmented, Segmenter};
use crate::error::{EncodeError, LemmatizeError};

// ---------------------------------------------------------------------------
// Segmenter
// ---------------------------------------------------------------------------

/// Lowercases text and extracts runs of alphanumeric characters (and `_`).
///
/// The last token before a run of `.`, `!` or `?` closes a sentence; the last
/// token before a blank line closes a paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSegmenter;

impl SimpleSegmenter {
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }
}

impl Segmenter for SimpleSegmenter {
    fn segment(&self, text: &str) -> Segmented {
        let mut out = Segmented::default();
        let mut word = String::new();
        let mut newlines = 0usize;

        fn flush(word: &mut String, out: &mut Segmented) {
            if !word.is_empty() {
                out.tokens.push(std::mem::take(word));
            }
        }

        fn mark(ends: &mut Vec<usize>, token_count: usize) {
            if token_count == 0 {
                return;
            }
            let last = token_count - 1;
            if ends.last() != Some(&last) {
                ends.push(last);
            }
        }

        for c in text.chars().flat_map(char::to_lowercase) {
            if Self::is_word_char(c) {
                word.push(c);
                newlines = 0;
                continue;
            }
            flush(&mut word, &mut out);
            match c {
                '.' | '!' | '?' => {
                    mark(&mut out.sentence_ends, out.tokens.len());
                    newlines = 0;
                }
                '\n' => {
                    newlines += 1;
                    if newlines == 2 {
                        mark(&mut out.paragraph_ends, out.tokens.len());
                    }
                }
                c if c.is_whitespace() => {}
                _ => newlines = 0,
            }
        }
        flush(&mut word, &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Lemmatizer
// ---------------------------------------------------------------------------

/// English lemmatizer based on an irregular-form table and suffix rules.
///
/// Always returns exactly one lemma; words no rule applies to are returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct SuffixLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
}

const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("sat", "sit"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("saw", "see"),
    ("seen", "see"),
    ("made", "make"),
    ("took", "take"),
    ("said", "say"),
    ("mice", "mouse"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("better", "good"),
    ("best", "good"),
];

impl SuffixLemmatizer {
    pub fn new() -> Self {
        SuffixLemmatizer {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
        }
    }

    fn strip(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return (*lemma).to_string();
        }
        let len = word.chars().count();

        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if word.ends_with("sses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes")
            || word.ends_with("zes")
        {
            return word[..word.len() - 2].to_string();
        }
        if len > 3
            && word.ends_with('s')
            && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
        {
            return word[..word.len() - 1].to_string();
        }
        if len > 5 && word.ends_with("ing") {
            return undouble(&word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("ed") {
            return undouble(&word[..word.len() - 2]);
        }
        word.to_string()
    }
}

/// Drops one letter of a doubled final consonant ("runn" -> "run"), except
/// for endings that are commonly doubled in the base form.
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if let [.., a, b] = chars.as_slice() {
        if a == b && !"aeiou".contains(*b) && !matches!(*b, 'l' | 's' | 'z') {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_string()
}

impl Default for SuffixLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<Vec<String>, LemmatizeError> {
        Ok(vec![self.strip(word)])
    }
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Feature-hashing encoder over character trigrams of `^token$` plus the
/// whole token, L2-normalised.
#[derive(Debug, Clone, Copy)]
pub struct HashingEncoder {
    dim: usize,
}

impl HashingEncoder {
    pub const DEFAULT_DIM: usize = 256;

    pub fn new(dim: usize) -> Self {
        HashingEncoder { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn features(token: &str) -> Vec<String> {
        let padded: Vec<char> = std::iter::once('^')
            .chain(token.chars())
            .chain(std::iter::once('$'))
            .collect();
        let mut features: Vec<String> = padded.windows(3).map(|w| w.iter().collect()).collect();
        features.push(token.to_string());
        features
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIM)
    }
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

impl Encoder for HashingEncoder {
    fn encode(&self, token: &str) -> Result<Embedding, EncodeError> {
        if self.dim == 0 {
            return Err(EncodeError::Backend {
                reason: "hashing encoder configured with zero dimensions".into(),
            });
        }
        let mut vector = vec![0.0f32; self.dim];
        for feature in Self::features(token) {
            let hash = fnv1a(feature.as_bytes());
            let slot = (hash % self.dim as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            vector[slot] += sign;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }
}
