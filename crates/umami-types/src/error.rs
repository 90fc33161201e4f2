use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the restaurant store. An unknown id is not an error; lookups
/// return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed restaurant data: {0}")]
    Malformed(String),
}

/// Errors from embedding or similarity search.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("vector index error: {0}")]
    Index(String),

    #[error("no index for restaurant '{0}' (run `umami ingest {0}`)")]
    IndexMissing(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors raised before an answer stream starts.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("llm failed: {0}")]
    Llm(#[from] LlmError),
}

/// Errors from the client side of the chat stream.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("server reported an error: {0}")]
    Server(String),

    #[error("malformed event: {0}")]
    Malformed(String),

    #[error("stream ended before the terminal event")]
    UnexpectedEnd,
}

/// Invalid transitions of the chat session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an answer is already pending")]
    PendingAlreadyOpen,

    #[error("no answer is pending")]
    NoPendingAnswer,
}

/// Errors from submitting a turn through the streaming chat client.
#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("a turn is already in flight")]
    Busy,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors from `umami ingest`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid restaurant id: '{0}'")]
    UnknownRestaurant(String),

    #[error(transparent)]
    Restaurant(#[from] RestaurantError),

    #[error("cannot read document '{path}': {message}")]
    Document { path: String, message: String },

    #[error("document '{0}' has no text to index")]
    EmptyDocument(String),

    #[error("chunking error: {0}")]
    Chunking(String),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Errors from assembling runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}
