//! Restaurant document ingestion: read, chunk, embed, and index.

pub mod chunker;

use std::path::Path;

use umami_core::restaurant::RestaurantRepository;
use umami_core::retrieval::embedder::Embedder;
use umami_types::error::IngestError;
use umami_types::restaurant::chunk_table_name;

use crate::restaurant::JsonRestaurantStore;
use crate::vector::chunks::LanceChunkIndex;

use self::chunker::chunk_document;

/// Result of one successful ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub restaurant_id: String,
    pub document: String,
    pub chunks: usize,
    pub table: String,
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Rebuild the chunk index for one restaurant from its document.
#[tracing::instrument(skip(store, index), fields(document = tracing::field::Empty))]
pub async fn ingest_restaurant<E: Embedder>(
    store: &JsonRestaurantStore,
    index: &LanceChunkIndex<E>,
    restaurant_id: &str,
) -> Result<IngestReport, IngestError> {
    let restaurant = store
        .find_by_id(restaurant_id)
        .await?
        .ok_or_else(|| IngestError::UnknownRestaurant(restaurant_id.to_string()))?;

    let path = store.document_path(&restaurant);
    let document = path.display().to_string();
    tracing::Span::current().record("document", document.as_str());

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| IngestError::Document {
            path: document.clone(),
            message: e.to_string(),
        })?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyDocument(document));
    }

    let chunks = chunk_document(&text, is_markdown(&path))?;
    if chunks.is_empty() {
        return Err(IngestError::EmptyDocument(document));
    }
    tracing::info!(chunks = chunks.len(), "Chunked restaurant document");

    let written = index.replace(&restaurant.id, &chunks).await?;

    Ok(IngestReport {
        restaurant_id: restaurant.id.clone(),
        document,
        chunks: written,
        table: chunk_table_name(&restaurant.id),
    })
}
