//! Business logic and port trait definitions for Umami.
//!
//! This crate defines the "ports" (provider, retriever, embedder, transport
//! and repository traits) that the infrastructure layer implements, plus the
//! chat session state machine and the answer pipeline. It depends only on
//! `umami-types` -- never on `umami-infra` or any network/storage crate.

pub mod answer;
pub mod chat;
pub mod llm;
pub mod locale;
pub mod restaurant;
pub mod retrieval;
