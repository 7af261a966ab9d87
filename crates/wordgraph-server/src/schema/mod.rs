//! API schema types for request/response definitions.
//!
//! Bodies use camelCase field names, matching the snapshot wire format.

pub mod ingest;
pub mod queries;
pub mod sessions;
