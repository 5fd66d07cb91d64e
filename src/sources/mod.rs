//! Catalog source plugins and the query adapter built on top of them.
//!
//! A [`CatalogSource`] knows how to talk to one remote catalog and turn its
//! records into canonical [`Book`]s. The rest of the crate never sees a
//! provider schema: it goes through [`CatalogAdapter`], which caps the
//! request size and turns every provider failure into an empty result.
//!
//! # Implementing a New Source
//!
//! 1. Create a struct that implements `CatalogSource`
//! 2. Normalize every record with [`BookBuilder`](crate::models::BookBuilder)
//!    so sentinel values are applied
//! 3. Wrap it in a `CatalogAdapter`

mod adapter;
mod google_books;
pub mod mock;

pub use adapter::CatalogAdapter;
pub use google_books::{GoogleBooksSource, GOOGLE_BOOKS_API};
pub use mock::MockSource;

use crate::models::{Book, CatalogQuery};
use async_trait::async_trait;

/// Interface implemented by every remote catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "google_books")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search the catalog. Zero matches is `Ok(vec![])`, not an error.
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Book>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
