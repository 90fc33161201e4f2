//! HTTP request handlers.

pub mod chat;
pub mod locale;
pub mod restaurant;
