//! Observability setup for Umami binaries.

pub mod tracing_setup;
