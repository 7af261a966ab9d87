//! Graph session registry.
//!
//! Each session owns exactly one [`WordGraph`]. Sessions are identified by a
//! UUID v4 [`SessionId`] and never share graph state.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wordgraph_core::WordGraph;

/// Unique session identifier (UUID v4 newtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph behind an async mutex; handlers await the lock without blocking
/// the runtime.
pub type SharedGraph = Arc<tokio::sync::Mutex<WordGraph>>;

/// Registry of live sessions.
///
/// Backed by `DashMap` for concurrent access from multiple handler tasks.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SharedGraph>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
        }
    }

    /// Stores `graph` under a fresh id.
    pub fn create(&self, graph: WordGraph) -> SessionId {
        let id = SessionId(Uuid::new_v4());
        self.sessions
            .insert(id, Arc::new(tokio::sync::Mutex::new(graph)));
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedGraph> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes a session. Returns `true` if it existed.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
