//! HTTP/JSON API server for word graph sessions.
//!
//! Each session owns one [`wordgraph_core::WordGraph`]. Clients create a
//! session, stream text into it, and read back snapshots or incremental
//! diffs.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod session;
pub mod state;
