//! Google Books catalog source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::CatalogConfig;
use crate::models::{Book, BookBuilder, CatalogQuery, EbookAccess, DEFAULT_RATING};
use crate::sources::{CatalogSource, SourceError};
use crate::utils::HttpClient;

/// Default volumes endpoint
pub const GOOGLE_BOOKS_API: &str = "https://www.googleapis.com/books/v1/volumes";

/// Google Books catalog source
///
/// Uses the public volumes search API, no key required.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: HttpClient,
    endpoint: String,
}

impl GoogleBooksSource {
    /// Create a source from catalog settings
    pub fn new(config: &CatalogConfig) -> Result<Self, SourceError> {
        let client = HttpClient::with_settings(&config.user_agent, config.timeout())?;
        Ok(Self::with_client(client, &config.endpoint))
    }

    /// Create a source with an existing client and endpoint
    pub fn with_client(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Parse a volumes response body into books.
    ///
    /// A document without `items` means zero results.
    pub fn parse_volumes(body: &str) -> Result<Vec<Book>, SourceError> {
        let data: VolumesResponse = serde_json::from_str(body)?;

        Ok(data
            .items
            .unwrap_or_default()
            .iter()
            .map(Self::parse_volume)
            .collect())
    }

    /// Normalize one volume record
    fn parse_volume(volume: &Volume) -> Book {
        let info = &volume.volume_info;
        let mut builder = BookBuilder::new();

        if let Some(title) = &info.title {
            builder = builder.title(title.as_str());
        }
        if let Some(authors) = &info.authors {
            builder = builder.authors(authors);
        }
        if let Some(id) = info
            .industry_identifiers
            .as_ref()
            .and_then(|ids| ids.first())
            .and_then(|id| id.identifier.as_ref())
        {
            builder = builder.isbn(id.as_str());
        }
        if let Some(thumbnail) = info
            .image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_ref())
        {
            builder = builder.cover_url(thumbnail.as_str());
        }
        if let Some(date) = &info.published_date {
            builder = builder.published_date(date);
        }

        let epub_available = volume
            .access_info
            .as_ref()
            .and_then(|a| a.epub.as_ref())
            .and_then(|e| e.is_available)
            .unwrap_or(false);

        builder
            .ebook_access(EbookAccess::from_flag(epub_available))
            .rating(rating_text(info.average_rating.as_ref()))
            .build()
    }
}

/// Render the provider's rating the way it was sent.
///
/// Numbers keep their shortest decimal form (`4`, `4.5`); strings pass
/// through untouched. Missing, null, zero or empty values become "0".
fn rating_text(value: Option<&serde_json::Value>) -> String {
    use serde_json::Value;

    match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f != 0.0 => f.to_string(),
            _ => DEFAULT_RATING.to_string(),
        },
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => DEFAULT_RATING.to_string(),
    }
}

#[async_trait]
impl CatalogSource for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Book>, SourceError> {
        if query.is_blank() {
            return Err(SourceError::InvalidRequest("empty query".to_string()));
        }

        let term = query.term();
        let max_results = query.max_results.to_string();
        tracing::debug!(endpoint = %self.endpoint, term = %term, "Querying Google Books");

        let response = self
            .client
            .client()
            .get(&self.endpoint)
            .query(&[
                ("q", term.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Google Books: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Google Books API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        Self::parse_volumes(&body)
    }
}

// ===== Google Books API Types =====

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
    access_info: Option<AccessInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    image_links: Option<ImageLinks>,
    average_rating: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessInfo {
    epub: Option<EpubAccess>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpubAccess {
    is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchMode;
    use mockito::Matcher;

    const FULL_VOLUME: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publishedDate": "1990-09-01",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "0441172717"},
                    {"type": "ISBN_13", "identifier": "9780441172719"}
                ],
                "imageLinks": {"thumbnail": "http://books.example/dune.jpg"},
                "averageRating": 4.5
            },
            "accessInfo": {"epub": {"isAvailable": true}}
        }]
    }"#;

    #[test]
    fn test_parse_full_volume() {
        let books = GoogleBooksSource::parse_volumes(FULL_VOLUME).unwrap();
        assert_eq!(books.len(), 1);

        let book = &books[0];
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_name, "Frank Herbert");
        assert_eq!(book.isbn, "0441172717");
        assert_eq!(book.cover_url, "http://books.example/dune.jpg");
        assert_eq!(book.ebook_access, EbookAccess::Available);
        assert_eq!(book.first_publish_year, "1990");
        assert_eq!(book.rating_raw, "4.5");
    }

    #[test]
    fn test_parse_sparse_volume_uses_sentinels() {
        let body = r#"{"items": [{"volumeInfo": {}}]}"#;
        let books = GoogleBooksSource::parse_volumes(body).unwrap();

        let book = &books[0];
        assert_eq!(book.title, "Unknown Title");
        assert_eq!(book.author_name, "Unknown Author");
        assert_eq!(book.isbn, "N/A");
        assert_eq!(book.cover_url, "");
        assert_eq!(book.ebook_access, EbookAccess::NotAvailable);
        assert_eq!(book.first_publish_year, "Unknown Year");
        assert_eq!(book.rating_raw, "0");
    }

    #[test]
    fn test_parse_without_items_is_empty() {
        let body = r#"{"kind": "books#volumes", "totalItems": 0}"#;
        assert!(GoogleBooksSource::parse_volumes(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        let result = GoogleBooksSource::parse_volumes("<html>oops</html>");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_multiple_authors_joined_with_comma() {
        let body = r#"{"items": [{"volumeInfo": {"authors": ["A. One", "B. Two"]}}]}"#;
        let books = GoogleBooksSource::parse_volumes(body).unwrap();
        assert_eq!(books[0].author_name, "A. One, B. Two");
    }

    #[test]
    fn test_rating_text() {
        use serde_json::json;

        assert_eq!(rating_text(Some(&json!(4))), "4");
        assert_eq!(rating_text(Some(&json!(3.5))), "3.5");
        assert_eq!(rating_text(Some(&json!(0))), "0");
        assert_eq!(rating_text(Some(&json!("undefined"))), "undefined");
        assert_eq!(rating_text(Some(&json!(""))), "0");
        assert_eq!(rating_text(Some(&serde_json::Value::Null)), "0");
        assert_eq!(rating_text(None), "0");
    }

    fn source_for(server: &mockito::ServerGuard) -> GoogleBooksSource {
        let client = HttpClient::with_settings("book-finder-test", std::time::Duration::from_secs(5))
            .unwrap();
        GoogleBooksSource::with_client(client, format!("{}/books/v1/volumes", server.url()))
    }

    #[tokio::test]
    async fn test_search_sends_prefixed_term_and_cap() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "inauthor:Frank Herbert".into()),
                Matcher::UrlEncoded("maxResults".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(FULL_VOLUME)
            .create_async()
            .await;

        let source = source_for(&server);
        let query = CatalogQuery::new(" Frank Herbert ", SearchMode::Author);
        let books = source.search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_search_non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source = source_for(&server);
        let result = source
            .search(&CatalogQuery::new("dune", SearchMode::Title))
            .await;

        assert!(matches!(result, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let server = mockito::Server::new_async().await;
        let source = source_for(&server);

        let result = source.search(&CatalogQuery::new("  ", SearchMode::Isbn)).await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }
}
