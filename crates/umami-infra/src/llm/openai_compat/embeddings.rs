//! OpenAI embeddings client implementing [`Embedder`].

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::embeddings::CreateEmbeddingRequestArgs;

use umami_core::retrieval::embedder::Embedder;
use umami_types::error::RetrievalError;

use super::config::{OpenAiCompatConfig, embedding_dimension};
use super::{build_client, map_openai_error};

/// Maximum inputs sent in one embeddings request.
pub const EMBED_BATCH_SIZE: usize = 64;

pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    pub fn new(config: &OpenAiCompatConfig) -> Self {
        Self {
            client: build_client(config),
            model: config.embedding_model.clone(),
            dimension: embedding_dimension(&config.embedding_model),
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(texts.to_vec())
            .build()
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| RetrievalError::Embedding(map_openai_error(e).to_string()))?;

        let mut data = response.data;
        data.sort_by_key(|embedding| embedding.index);
        if data.len() != texts.len() {
            return Err(RetrievalError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }

        data.into_iter()
            .map(|embedding| {
                if embedding.embedding.len() != self.dimension {
                    return Err(RetrievalError::DimensionMismatch {
                        expected: self.dimension,
                        actual: embedding.embedding.len(),
                    });
                }
                Ok(embedding.embedding)
            })
            .collect()
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBED_BATCH_SIZE) {
            tracing::debug!(model = %self.model, batch = batch.len(), "Embedding batch");
            vectors.extend(self.embed_batch(batch).await?);
        }
        Ok(vectors)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_embed_empty_input_makes_no_request() {
        let embedder = OpenAiEmbedder::new(&OpenAiCompatConfig {
            provider_name: "openai".to_string(),
            // Unroutable: any request would fail.
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: SecretString::from("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
        });
        assert_eq!(embedder.model_name(), "text-embedding-3-large");
        assert_eq!(embedder.dimension(), 3072);
        assert!(embedder.embed(&[]).await.unwrap().is_empty());
    }
}
