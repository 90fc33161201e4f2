//! Retrieval ports: text embedding and per-restaurant similarity search.
//!
//! - `Embedder`: text to vectors (RPITIT)
//! - `DocumentRetriever`: nearest chunks for a question (RPITIT)
//! - `BoxDocumentRetriever`: object-safe wrapper for runtime selection

pub mod box_retriever;
pub mod embedder;
pub mod retriever;
