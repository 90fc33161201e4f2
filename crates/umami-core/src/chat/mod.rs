//! Chat session state and the streaming chat client.
//!
//! - `ChatSession`: transcript, history and the pending answer buffer
//! - `ChatTransport`: one request in, a stream of `ChatFrame`s out
//! - `StreamingChatClient`: drives one turn at a time over a transport

pub mod client;
pub mod session;
pub mod transport;
