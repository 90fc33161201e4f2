//! Infrastructure layer for Umami.
//!
//! Contains implementations of the ports defined in `umami-core`: the JSON
//! restaurant store, the OpenAI-compatible chat and embedding clients, the
//! LanceDB chunk index, the SSE chat transport, document ingestion, and the
//! config loader.

pub mod chat_client;
pub mod config;
pub mod ingest;
pub mod llm;
pub mod restaurant;
pub mod vector;
