//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Book, BookBuilder, CatalogQuery, EbookAccess};
use crate::sources::{CatalogSource, SourceError};

/// A mock source for testing that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockSource {
    response: Mutex<Option<Result<Vec<Book>, SourceError>>>,
    last_query: Mutex<Option<CatalogQuery>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the books to return.
    pub fn set_books(&self, books: Vec<Book>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Ok(books));
    }

    /// Make every search fail with `error`.
    pub fn set_error(&self, error: SourceError) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Err(error));
    }

    /// Clear the configured response.
    pub fn clear_response(&self) {
        let mut guard = self.response.lock().unwrap();
        *guard = None;
    }

    /// Number of searches received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent query received.
    pub fn last_query(&self) -> Option<CatalogQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Book>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(response) => response.clone(),
            None => Ok(Vec::new()),
        }
    }
}

/// Helper function to create a book for testing.
pub fn make_book(title: &str, rating: &str, ebook: bool) -> Book {
    BookBuilder::new()
        .title(title)
        .rating(rating)
        .ebook_access(EbookAccess::from_flag(ebook))
        .build()
}
