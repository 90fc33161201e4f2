//! ChatTransport trait definition.

use std::pin::Pin;

use futures_util::Stream;

use umami_types::chat::{ChatFrame, ChatRequest};
use umami_types::error::TransportError;

/// Frames of one chat response, in delivery order.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<ChatFrame, TransportError>> + Send + 'static>>;

/// Client side of `POST /api/chat`.
///
/// Implementations issue exactly one request per call and never retry.
/// Dropping the returned stream closes the underlying connection. The
/// HTTP implementation is `SseChatTransport` in umami-infra.
pub trait ChatTransport: Send + Sync {
    fn open(&self, request: ChatRequest) -> FrameStream;
}
