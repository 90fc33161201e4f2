//! BoxDocumentRetriever -- object-safe dynamic dispatch wrapper for DocumentRetriever.
//!
//! 1. Define an object-safe `DocumentRetrieverDyn` trait with boxed futures
//! 2. Blanket-impl `DocumentRetrieverDyn` for all `T: DocumentRetriever`
//! 3. `BoxDocumentRetriever` wraps `Box<dyn DocumentRetrieverDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use umami_types::error::RetrievalError;
use umami_types::retrieval::RetrievedDocument;

use super::retriever::DocumentRetriever;

/// Object-safe version of [`DocumentRetriever`] with boxed futures.
pub trait DocumentRetrieverDyn: Send + Sync {
    fn search_boxed<'a>(
        &'a self,
        restaurant_id: &'a str,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedDocument>, RetrievalError>> + Send + 'a>>;
}

impl<T: DocumentRetriever> DocumentRetrieverDyn for T {
    fn search_boxed<'a>(
        &'a self,
        restaurant_id: &'a str,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedDocument>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(self.search(restaurant_id, query, limit))
    }
}

/// Type-erased document retriever.
///
/// Lets `AppState` hold the LanceDB-backed index in production and a
/// scripted retriever in tests behind the same type.
pub struct BoxDocumentRetriever {
    inner: Box<dyn DocumentRetrieverDyn + Send + Sync>,
}

impl BoxDocumentRetriever {
    /// Wrap a concrete `DocumentRetriever` in a type-erased box.
    pub fn new<T: DocumentRetriever + 'static>(retriever: T) -> Self {
        Self {
            inner: Box::new(retriever),
        }
    }

    /// Return up to `limit` chunks nearest to `query`, closest first.
    pub async fn search(
        &self,
        restaurant_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        self.inner.search_boxed(restaurant_id, query, limit).await
    }
}
