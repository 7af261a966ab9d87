//! Mutation tracking for incremental synchronization.
//!
//! Every graph mutation appends a [`DiffRecord`] to the [`DiffTracker`].
//! Draining returns the accumulated records without clearing them; consumers
//! pair [`DiffTracker::drain`] with [`DiffTracker::clear`] (or use
//! [`DiffTracker::take`]) to get exactly-once delivery per cycle.

use serde::{Deserialize, Serialize};

use crate::edge::EdgeType;
use crate::node::WordNode;
use crate::snapshot::EdgeView;

/// A single recorded mutation, tagged with the entity identity and its new
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DiffRecord {
    NodeCreated {
        node: WordNode,
    },
    NodeCountChanged {
        id: String,
        #[serde(rename = "occurrenceCount")]
        occurrence_count: u32,
    },
    NodeRemoved {
        id: String,
    },
    EdgeCreated {
        edge: EdgeView,
    },
    EdgeWeightChanged {
        source: String,
        target: String,
        #[serde(rename = "type")]
        kind: EdgeType,
        weight: f32,
    },
    EdgeRemoved {
        source: String,
        target: String,
        #[serde(rename = "type")]
        kind: EdgeType,
    },
    LemmaNodeCreated {
        id: String,
    },
    LemmaEdgeCreated {
        edge: EdgeView,
    },
    LemmaEdgeWeightChanged {
        source: String,
        target: String,
        weight: f32,
    },
}

/// The records accumulated since the last clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSet {
    pub records: Vec<DiffRecord>,
}

impl DiffSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffRecord> {
        self.records.iter()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// In-memory accumulator of mutation records.
#[derive(Debug, Clone, Default)]
pub struct DiffTracker {
    records: Vec<DiffRecord>,
}

impl DiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: DiffRecord) {
        self.records.push(record);
    }

    /// Returns a copy of the accumulated records. Does not clear.
    pub fn drain(&self) -> DiffSet {
        DiffSet {
            records: self.records.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Drain and clear in one step.
    pub fn take(&mut self) -> DiffSet {
        DiffSet {
            records: std::mem::take(&mut self.records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discards every record appended after position `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_does_not_clear() {
        let mut tracker = DiffTracker::new();
        tracker.record(DiffRecord::NodeRemoved { id: "x".into() });

        assert_eq!(tracker.drain().len(), 1);
        assert_eq!(tracker.drain().len(), 1);

        tracker.clear();
        assert!(tracker.drain().is_empty());
    }

    #[test]
    fn take_empties_the_tracker() {
        let mut tracker = DiffTracker::new();
        tracker.record(DiffRecord::LemmaNodeCreated { id: "run".into() });
        let taken = tracker.take();
        assert_eq!(taken.len(), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn records_serialize_with_op_tag() {
        let record = DiffRecord::NodeCountChanged {
            id: "apple".into(),
            occurrence_count: 2,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"op": "nodeCountChanged", "id": "apple", "occurrenceCount": 2})
        );

        let removed = DiffRecord::EdgeRemoved {
            source: "a".into(),
            target: "b".into(),
            kind: EdgeType::Semantic,
        };
        assert_eq!(
            serde_json::to_value(&removed).unwrap(),
            serde_json::json!({"op": "edgeRemoved", "source": "a", "target": "b", "type": "semantic"})
        );
    }

    #[test]
    fn truncate_rolls_back_to_mark() {
        let mut tracker = DiffTracker::new();
        tracker.record(DiffRecord::NodeRemoved { id: "keep".into() });
        let mark = tracker.len();
        tracker.record(DiffRecord::NodeRemoved { id: "drop".into() });
        tracker.truncate(mark);
        assert_eq!(
            tracker.drain().records,
            vec![DiffRecord::NodeRemoved { id: "keep".into() }]
        );
    }
}
