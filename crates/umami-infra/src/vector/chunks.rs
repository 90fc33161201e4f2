//! Per-restaurant chunk index backed by LanceDB.
//!
//! Implements [`DocumentRetriever`] by embedding the question and running a
//! cosine-distance vector search over `restaurant_chunks_{id}`. Ingestion
//! writes through [`LanceChunkIndex::replace`], which swaps the whole table.

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int32Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use uuid::Uuid;

use umami_core::retrieval::embedder::Embedder;
use umami_core::retrieval::retriever::DocumentRetriever;
use umami_types::error::RetrievalError;
use umami_types::restaurant::chunk_table_name;
use umami_types::retrieval::RetrievedDocument;

use super::lance::LanceVectorStore;
use super::schema::{restaurant_chunks_schema, vector_item_field};

fn index_error(context: &str) -> impl FnOnce(lancedb::Error) -> RetrievalError + '_ {
    move |e| RetrievalError::Index(format!("{context}: {e}"))
}

pub struct LanceChunkIndex<E> {
    store: LanceVectorStore,
    embedder: E,
}

impl<E: Embedder> LanceChunkIndex<E> {
    pub fn new(store: LanceVectorStore, embedder: E) -> Self {
        Self { store, embedder }
    }

    fn dimension(&self) -> i32 {
        self.embedder.dimension() as i32
    }

    /// Embed `chunks` and replace the restaurant's table with them.
    /// Returns the number of rows written.
    pub async fn replace(
        &self,
        restaurant_id: &str,
        chunks: &[String],
    ) -> Result<usize, RetrievalError> {
        let embeddings = self.embedder.embed(chunks).await?;
        if embeddings.len() != chunks.len() {
            return Err(RetrievalError::Embedding(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let schema = Arc::new(restaurant_chunks_schema(self.dimension()));
        let table_name = chunk_table_name(restaurant_id);

        self.store
            .drop_table(&table_name)
            .await
            .map_err(index_error("Failed to drop old chunk table"))?;
        let table = self
            .store
            .ensure_table(&table_name, schema.clone())
            .await
            .map_err(index_error("Failed to create chunk table"))?;

        if chunks.is_empty() {
            return Ok(0);
        }

        let batch = self.build_record_batch(restaurant_id, chunks, &embeddings)?;
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);
        table
            .add(reader)
            .execute()
            .await
            .map_err(index_error("Failed to add chunks"))?;

        tracing::info!(
            restaurant_id,
            table = %table_name,
            chunks = chunks.len(),
            "Replaced restaurant chunk table"
        );
        Ok(chunks.len())
    }

    /// Number of chunks stored for a restaurant; 0 when never ingested.
    pub async fn count(&self, restaurant_id: &str) -> Result<usize, RetrievalError> {
        let table_name = chunk_table_name(restaurant_id);
        match self
            .store
            .open_table(&table_name)
            .await
            .map_err(index_error("Failed to open chunk table"))?
        {
            Some(table) => table
                .count_rows(None)
                .await
                .map_err(index_error("Failed to count chunks")),
            None => Ok(0),
        }
    }

    fn build_record_batch(
        &self,
        restaurant_id: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<RecordBatch, RetrievalError> {
        let dimension = self.embedder.dimension();
        let mut values = Vec::with_capacity(chunks.len() * dimension);
        for embedding in embeddings {
            if embedding.len() != dimension {
                return Err(RetrievalError::DimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
            values.extend_from_slice(embedding);
        }

        let ingested_at = Utc::now().to_rfc3339();
        let rows = chunks.len();

        let chunk_ids = StringArray::from(
            (0..rows)
                .map(|_| Uuid::now_v7().to_string())
                .collect::<Vec<_>>(),
        );
        let restaurant_ids = StringArray::from(vec![restaurant_id.to_string(); rows]);
        let indices = Int32Array::from((0..rows as i32).collect::<Vec<_>>());
        let texts = StringArray::from(chunks.to_vec());
        let models = StringArray::from(vec![self.embedder.model_name().to_string(); rows]);
        let timestamps = StringArray::from(vec![ingested_at; rows]);
        let vectors = FixedSizeListArray::new(
            vector_item_field(),
            self.dimension(),
            Arc::new(Float32Array::from(values)),
            None,
        );

        RecordBatch::try_new(
            Arc::new(restaurant_chunks_schema(self.dimension())),
            vec![
                Arc::new(chunk_ids),
                Arc::new(restaurant_ids),
                Arc::new(indices),
                Arc::new(texts),
                Arc::new(models),
                Arc::new(timestamps),
                Arc::new(vectors),
            ],
        )
        .map_err(|e| RetrievalError::Index(format!("Failed to build record batch: {e}")))
    }
}

impl<E: Embedder> DocumentRetriever for LanceChunkIndex<E> {
    async fn search(
        &self,
        restaurant_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        let table_name = chunk_table_name(restaurant_id);
        let Some(table) = self
            .store
            .open_table(&table_name)
            .await
            .map_err(index_error("Failed to open chunk table"))?
        else {
            return Err(RetrievalError::IndexMissing(restaurant_id.to_string()));
        };

        let query_vector = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Embedding("no embedding returned for query".into()))?;

        let results = table
            .vector_search(query_vector.as_slice())
            .map_err(index_error("Vector search setup failed"))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(index_error("Vector search failed"))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(index_error("Failed to collect results"))?;

        let mut documents = Vec::new();
        for batch in &batches {
            let Some(texts) = batch
                .column_by_name("chunk_text")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            else {
                continue;
            };
            // The _distance column is added by LanceDB vector search
            let distances = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

            for i in 0..texts.len() {
                documents.push(RetrievedDocument {
                    text: texts.value(i).to_string(),
                    distance: distances.map_or(0.0, |d| d.value(i)),
                });
            }
        }

        documents.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        documents.truncate(limit);
        Ok(documents)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Keyword embedder: one axis per topic so nearest-neighbour results
    /// are predictable.
    pub(crate) struct KeywordEmbedder;

    impl KeywordEmbedder {
        fn vector(text: &str) -> Vec<f32> {
            let text = text.to_lowercase();
            let mut v = vec![0.0_f32; 4];
            if text.contains("soup") {
                v[0] = 1.0;
            } else if text.contains("tuna") {
                v[1] = 1.0;
            } else if text.contains("dessert") {
                v[2] = 1.0;
            } else {
                v[3] = 1.0;
            }
            v
        }
    }

    impl Embedder for KeywordEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
            Ok(texts.iter().map(|t| Self::vector(t)).collect())
        }

        fn model_name(&self) -> &str {
            "keyword-test"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    pub(crate) async fn setup_index() -> (LanceChunkIndex<KeywordEmbedder>, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create LanceVectorStore");
        (LanceChunkIndex::new(store, KeywordEmbedder), temp_dir)
    }

    fn chunks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_replace_and_search_nearest_first() {
        let (index, _tmp) = setup_index().await;
        let written = index
            .replace(
                "R1",
                &chunks(&["Tuna roll 800 yen", "Miso soup 300 yen", "Matcha dessert"]),
            )
            .await
            .unwrap();
        assert_eq!(written, 3);

        let docs = index.search("R1", "Do you have soup?", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "Miso soup 300 yen");
        assert!(docs[0].distance <= docs[1].distance);
    }

    #[tokio::test]
    async fn test_replace_swaps_previous_chunks() {
        let (index, _tmp) = setup_index().await;
        index
            .replace("R1", &chunks(&["a", "b", "c"]))
            .await
            .unwrap();
        index.replace("R1", &chunks(&["Tuna roll"])).await.unwrap();

        assert_eq!(index.count("R1").await.unwrap(), 1);
        let docs = index.search("R1", "tuna", 4).await.unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn test_restaurants_are_isolated() {
        let (index, _tmp) = setup_index().await;
        index.replace("R1", &chunks(&["Miso soup"])).await.unwrap();
        index.replace("R2", &chunks(&["Tuna roll"])).await.unwrap();

        let docs = index.search("R2", "soup", 4).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "Tuna roll");
    }

    #[tokio::test]
    async fn test_similar_ids_keep_separate_tables() {
        let (index, _tmp) = setup_index().await;
        index.replace("sushi.ten", &chunks(&["Miso soup"])).await.unwrap();
        index
            .replace("sushi_ten", &chunks(&["Tuna roll", "Matcha dessert"]))
            .await
            .unwrap();

        assert_eq!(index.count("sushi.ten").await.unwrap(), 1);
        assert_eq!(index.count("sushi_ten").await.unwrap(), 2);
        let docs = index.search("sushi.ten", "tuna", 4).await.unwrap();
        assert_eq!(docs[0].text, "Miso soup");
    }

    #[tokio::test]
    async fn test_search_without_index_is_missing() {
        let (index, _tmp) = setup_index().await;
        assert_eq!(index.count("R9").await.unwrap(), 0);
        let err = index.search("R9", "soup", 4).await.unwrap_err();
        assert!(matches!(err, RetrievalError::IndexMissing(id) if id == "R9"));
    }
}
