//! Document chunks and retrieval results.

use serde::{Deserialize, Serialize};

/// A slice of a restaurant document, stored alongside its embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub restaurant_id: String,
    pub chunk_index: u32,
    pub text: String,
}

/// A chunk returned by similarity search, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    /// Cosine distance to the query embedding (lower is closer).
    pub distance: f32,
}
