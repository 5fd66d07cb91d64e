//! Catalog query adapter.

use std::sync::Arc;

use crate::models::{Book, CatalogQuery, SearchMode, MAX_RESULTS};
use crate::sources::{CatalogSource, SourceError};

/// Front door to a catalog source.
///
/// Builds the capped [`CatalogQuery`] and hides provider failures: a search
/// that fails for any reason is logged and reported as zero results, so the
/// caller replaces its list with an empty one just as for a search with no
/// matches.
#[derive(Debug, Clone)]
pub struct CatalogAdapter {
    source: Arc<dyn CatalogSource>,
    max_results: usize,
}

impl CatalogAdapter {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            max_results: MAX_RESULTS,
        }
    }

    /// Set the per-search result count (never above [`MAX_RESULTS`])
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max.min(MAX_RESULTS);
        self
    }

    /// The wrapped source
    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    /// Search the catalog, returning an empty list on any failure.
    ///
    /// The caller is expected to have rejected blank queries already.
    pub async fn search(&self, query: &str, mode: SearchMode) -> Vec<Book> {
        match self.try_search(query, mode).await {
            Ok(books) => books,
            Err(e) => {
                tracing::warn!(
                    source = self.source.id(),
                    mode = %mode,
                    error = %e,
                    "Catalog search failed"
                );
                Vec::new()
            }
        }
    }

    /// Search the catalog, surfacing the provider error.
    pub async fn try_search(&self, query: &str, mode: SearchMode) -> Result<Vec<Book>, SourceError> {
        let query = CatalogQuery::new(query, mode).max_results(self.max_results);

        let mut books = self.source.search(&query).await?;
        books.truncate(query.max_results);

        tracing::debug!(
            source = self.source.id(),
            term = %query.term(),
            count = books.len(),
            "Catalog search completed"
        );
        Ok(books)
    }
}
