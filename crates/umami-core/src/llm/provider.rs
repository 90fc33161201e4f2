//! LlmProvider trait definition.

use std::pin::Pin;

use futures_util::Stream;

use umami_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Stream of events from one streamed completion.
pub type LlmEventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for LLM provider backends (OpenAI and compatible endpoints).
///
/// `stream` returns a boxed stream rather than an RPITIT future so the
/// trait stays object-safe and the pipeline can hold an
/// `Arc<dyn LlmProvider>` picked at startup.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    fn stream(&self, request: CompletionRequest) -> LlmEventStream;
}
