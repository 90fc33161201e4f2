//! Shared domain types for Umami.
//!
//! Restaurants, chat turns and wire frames, locales, LLM request shapes,
//! retrieval results, configuration and the error enums used across the
//! workspace.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod locale;
pub mod restaurant;
pub mod retrieval;
