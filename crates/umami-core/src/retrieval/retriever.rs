//! DocumentRetriever trait definition.

use umami_types::error::RetrievalError;
use umami_types::retrieval::RetrievedDocument;

/// Similarity search over a restaurant's ingested document chunks.
///
/// Implementations live in umami-infra (e.g., `LanceChunkIndex`).
pub trait DocumentRetriever: Send + Sync {
    /// Return up to `limit` chunks nearest to `query`, closest first.
    fn search(
        &self,
        restaurant_id: &str,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievedDocument>, RetrievalError>> + Send;
}
