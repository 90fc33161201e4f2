//! Answer generation: retrieve context, delegate to the LLM, relay fragments.
//!
//! `AnswerPipeline::answer` composes three stages:
//! 1. transform -- fetch the restaurant's nearest chunks and build the
//!    completion request (`prompt`)
//! 2. delegate -- hand the request to the `LlmProvider`
//! 3. relay -- map provider events to answer frames ending in exactly one
//!    terminal frame (`relay`)

pub mod prompt;
pub mod relay;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info_span;

use umami_types::chat::HistoryPair;
use umami_types::error::{AnswerError, RetrievalError};
use umami_types::llm::CompletionRequest;
use umami_types::locale::Locale;

use crate::llm::provider::LlmProvider;
use crate::retrieval::box_retriever::BoxDocumentRetriever;

use self::relay::{AnswerFrame, AnswerStream};

/// Model and retrieval knobs, taken from config at startup.
#[derive(Debug, Clone)]
pub struct AnswerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_k: usize,
}

/// Everything one answer needs, already validated by the caller.
#[derive(Debug, Clone)]
pub struct AnswerInput {
    pub question: String,
    pub history: Vec<HistoryPair>,
    /// Restaurant whose index grounds the answer. `None` answers with an
    /// empty context.
    pub restaurant_id: Option<String>,
    pub restaurant_name: String,
    pub locale: Locale,
}

pub struct AnswerPipeline {
    provider: Arc<dyn LlmProvider>,
    retriever: BoxDocumentRetriever,
    settings: AnswerSettings,
}

impl AnswerPipeline {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        retriever: BoxDocumentRetriever,
        settings: AnswerSettings,
    ) -> Self {
        Self {
            provider,
            retriever,
            settings,
        }
    }

    /// Fetch the joined context block for the input's restaurant.
    pub async fn gather_context(&self, input: &AnswerInput) -> Result<String, RetrievalError> {
        let Some(restaurant_id) = input.restaurant_id.as_deref() else {
            return Ok(String::new());
        };
        let documents = self
            .retriever
            .search(restaurant_id, &input.question, self.settings.top_k)
            .await?;
        tracing::debug!(
            restaurant_id,
            count = documents.len(),
            "Retrieved context chunks"
        );
        Ok(prompt::join_context(&documents))
    }

    /// Build the completion request for `input` grounded in `context`.
    pub fn build_request(&self, input: &AnswerInput, context: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: prompt::build_messages(
                &input.restaurant_name,
                input.locale,
                context,
                &input.history,
                &input.question,
            ),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Retrieve, delegate and relay. Errors before the provider call are
    /// returned directly; provider errors arrive as `AnswerFrame::Failed`.
    pub async fn answer(&self, input: &AnswerInput) -> Result<AnswerStream, AnswerError> {
        let context = self.gather_context(input).await?;
        let request = self.build_request(input, &context);
        Ok(relay::relay(self.provider.stream(request)))
    }

    /// Like [`answer`](Self::answer), but the relay runs on its own task so
    /// the provider call completes even if the receiver goes away.
    pub async fn answer_detached(
        &self,
        input: &AnswerInput,
    ) -> Result<mpsc::Receiver<AnswerFrame>, AnswerError> {
        let span = info_span!(
            "gen_ai.answer",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.settings.model,
            gen_ai.request.max_tokens = self.settings.max_tokens,
            gen_ai.request.temperature = self.settings.temperature,
            restaurant_id = input.restaurant_id.as_deref().unwrap_or(""),
            history_len = input.history.len(),
        );
        let frames = self.answer(input).await?;
        Ok(relay::spawn_relay(frames, span))
    }
}
