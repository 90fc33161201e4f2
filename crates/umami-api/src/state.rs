//! Shared application state for the HTTP server and CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use umami_core::answer::{AnswerPipeline, AnswerSettings};
use umami_core::llm::provider::LlmProvider;
use umami_core::retrieval::box_retriever::BoxDocumentRetriever;
use umami_infra::config::{api_key_from_env, resolve_path, vector_store_dir};
use umami_infra::llm::openai_compat::config::OpenAiCompatConfig;
use umami_infra::llm::openai_compat::{OpenAiCompatibleProvider, OpenAiEmbedder};
use umami_infra::restaurant::JsonRestaurantStore;
use umami_infra::vector::chunks::LanceChunkIndex;
use umami_infra::vector::lance::LanceVectorStore;
use umami_types::config::AppConfig;

/// Read-only handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub restaurants: Arc<JsonRestaurantStore>,
    pub answers: Arc<AnswerPipeline>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        restaurants: JsonRestaurantStore,
        answers: AnswerPipeline,
        config: AppConfig,
    ) -> Self {
        Self {
            restaurants: Arc::new(restaurants),
            answers: Arc::new(answers),
            config: Arc::new(config),
        }
    }

    /// Build the server state from the data directory: config, restaurant
    /// store, OpenAI-compatible provider and the LanceDB-backed retriever.
    pub async fn init(data_dir: &Path, config: AppConfig) -> anyhow::Result<Self> {
        let llm_config = openai_config(&config)?;
        let provider: Arc<dyn LlmProvider> =
            Arc::new(OpenAiCompatibleProvider::new(&llm_config));
        let index = open_chunk_index(data_dir, &llm_config).await?;

        let settings = answer_settings(&config);
        tracing::info!(
            provider = provider.name(),
            model = %settings.model,
            top_k = settings.top_k,
            "Answer pipeline ready"
        );
        let answers = AnswerPipeline::new(provider, BoxDocumentRetriever::new(index), settings);

        Ok(Self::new(restaurant_store(data_dir, &config), answers, config))
    }
}

pub fn restaurants_path(data_dir: &Path, config: &AppConfig) -> PathBuf {
    resolve_path(data_dir, &config.restaurants.path)
}

pub fn restaurant_store(data_dir: &Path, config: &AppConfig) -> JsonRestaurantStore {
    JsonRestaurantStore::new(restaurants_path(data_dir, config))
}

pub fn answer_settings(config: &AppConfig) -> AnswerSettings {
    AnswerSettings {
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
        top_k: config.retrieval.top_k,
    }
}

pub fn openai_config(config: &AppConfig) -> anyhow::Result<OpenAiCompatConfig> {
    let api_key = api_key_from_env()?;
    Ok(OpenAiCompatConfig::from_llm_config(&config.llm, api_key))
}

/// Open the chunk index under `{data_dir}/vector_store`.
pub async fn open_chunk_index(
    data_dir: &Path,
    llm_config: &OpenAiCompatConfig,
) -> anyhow::Result<LanceChunkIndex<OpenAiEmbedder>> {
    let path = vector_store_dir(data_dir);
    let store = LanceVectorStore::new(path.clone())
        .await
        .with_context(|| format!("failed to open vector store at {}", path.display()))?;
    Ok(LanceChunkIndex::new(store, OpenAiEmbedder::new(llm_config)))
}
