//! Frame-by-frame ingestion.
//!
//! [`IngestFrames`] runs the same per-token pipeline as
//! [`WordGraph::ingest`], but lazily: every call to `next` advances it until
//! the next frame is due and yields a [`Snapshot`]. The first item is the
//! state before any token is ingested; after that a snapshot follows every
//! `frame_step` tokens. Tokens after the last full frame are still ingested,
//! they just produce no trailing snapshot.

use std::iter::FusedIterator;

use crate::collab::Segmented;
use crate::error::GraphError;
use crate::graph::WordGraph;
use crate::pipeline::BoundaryCursor;
use crate::snapshot::Snapshot;

/// Lazy snapshot stream over one ingest call. See the module docs.
///
/// Stops after the first error. Dropping it early leaves the graph at the
/// last fully processed token.
pub struct IngestFrames<'g> {
    graph: &'g mut WordGraph,
    input: Segmented,
    cursor: BoundaryCursor,
    next_token: usize,
    frame_step: usize,
    reset_window: bool,
    started: bool,
    finished: bool,
}

impl<'g> IngestFrames<'g> {
    fn new(graph: &'g mut WordGraph, input: Segmented, reset_window: bool, frame_step: usize) -> Self {
        IngestFrames {
            graph,
            input,
            cursor: BoundaryCursor::default(),
            next_token: 0,
            frame_step: frame_step.max(1),
            reset_window,
            started: false,
            finished: false,
        }
    }

    /// Number of input tokens not yet ingested.
    pub fn remaining(&self) -> usize {
        self.input.tokens.len() - self.next_token
    }
}

impl Iterator for IngestFrames<'_> {
    type Item = Result<Snapshot, GraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.reset_window {
                self.graph.window.clear();
            }
            return Some(Ok(self.graph.snapshot()));
        }

        while self.next_token < self.input.tokens.len() {
            let idx = self.next_token;
            self.next_token += 1;
            if let Err(err) = self.graph.ingest_token(&self.input, idx, &mut self.cursor) {
                self.finished = true;
                return Some(Err(err));
            }
            if (idx + 1) % self.frame_step == 0 {
                return Some(Ok(self.graph.snapshot()));
            }
        }
        self.finished = true;
        None
    }
}

impl FusedIterator for IngestFrames<'_> {}

impl WordGraph {
    /// Streams snapshots while ingesting `input`. A `frame_step` of 0 is
    /// treated as 1.
    pub fn ingest_frames(
        &mut self,
        input: Segmented,
        reset_window: bool,
        frame_step: usize,
    ) -> IngestFrames<'_> {
        IngestFrames::new(self, input, reset_window, frame_step)
    }

    /// Segments `text` and streams its ingestion.
    pub fn ingest_text_frames(
        &mut self,
        text: &str,
        reset_window: bool,
        frame_step: usize,
    ) -> IngestFrames<'_> {
        let input = self.collab.segmenter.segment(text);
        self.ingest_frames(input, reset_window, frame_step)
    }
}
