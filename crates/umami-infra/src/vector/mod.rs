//! Vector database infrastructure for restaurant document chunks.
//!
//! `LanceVectorStore` manages the embedded LanceDB connection,
//! `LanceChunkIndex` stores and searches one chunk table per restaurant.

pub mod chunks;
pub mod lance;
pub mod schema;
