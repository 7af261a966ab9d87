pub mod collab;
pub mod config;
pub mod diff;
pub mod edge;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod lemma;
pub mod node;
pub mod pipeline;
pub mod snapshot;
pub mod stream;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use collab::{Collaborators, Embedding, Encoder, Lemmatizer, Segmented, Segmenter};
pub use config::GraphConfig;
pub use diff::{DiffRecord, DiffSet, DiffTracker};
pub use edge::{EdgeKind, EdgeType, LemmaEdge, WordEdge};
pub use embedding::{cosine_similarity, EmbeddingCache};
pub use error::{EncodeError, GraphError, LemmatizeError};
pub use graph::{IncidentEdges, WordGraph};
pub use lemma::LemmaGraph;
pub use node::{LemmaNode, WordNode};
pub use pipeline::BufferMode;
pub use snapshot::{EdgeView, Snapshot};
pub use stream::IngestFrames;
pub use text::{HashingEncoder, SimpleSegmenter, SuffixLemmatizer};
