//! Configuration for the OpenAI-compatible provider and embedder.

use secrecy::SecretString;

use umami_types::config::LlmConfig;

/// Default base URL of the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-compatible endpoint.
///
/// Not `Debug`: holds the API key.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name, used in trace spans.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Chat model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// Embedding model identifier (e.g., "text-embedding-3-small").
    pub embedding_model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[llm]` config section and a key from the environment.
    pub fn from_llm_config(llm: &LlmConfig, api_key: SecretString) -> Self {
        let provider_name = if llm.base_url.trim_end_matches('/') == OPENAI_BASE_URL {
            "openai"
        } else {
            "openai_compatible"
        };
        Self {
            provider_name: provider_name.to_string(),
            base_url: llm.base_url.clone(),
            api_key,
            model: llm.model.clone(),
            embedding_model: llm.embedding_model.clone(),
        }
    }
}

/// Output dimension of known OpenAI embedding models.
///
/// Unknown models fall back to 1536, the dimension of
/// `text-embedding-3-small` and `text-embedding-ada-002`.
pub fn embedding_dimension(model: &str) -> usize {
    match model {
        "text-embedding-3-large" => 3072,
        _ => 1536,
    }
}
