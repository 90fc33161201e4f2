//! LLM provider abstraction.
//!
//! `LlmProvider` is the streaming completion port the answer pipeline
//! delegates to. Implementations live in umami-infra.

pub mod provider;
