//! HTTP layer for Umami.
//!
//! Axum server exposing the streaming chat endpoint, restaurant and locale
//! lookups, and a health check. Error bodies are flat `{"error": "..."}`.

pub mod error;
pub mod handlers;
pub mod router;
