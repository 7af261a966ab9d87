//! HTTP handler modules for the wordgraph API.
//!
//! Handlers are thin: they parse the request, lock the session graph,
//! delegate to [`wordgraph_core::WordGraph`], and return JSON.

pub mod ingest;
pub mod queries;
pub mod sessions;
