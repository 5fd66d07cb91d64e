//! Catalog query models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hard cap on the number of records requested per search
pub const MAX_RESULTS: usize = 10;

/// Which field a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Title,
    Author,
    Isbn,
}

impl SearchMode {
    /// Returns the mode identifier
    pub fn id(&self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            SearchMode::Isbn => "isbn",
        }
    }

    /// Provider query prefix for this mode
    pub fn prefix(&self) -> &'static str {
        match self {
            SearchMode::Title => "intitle:",
            SearchMode::Author => "inauthor:",
            SearchMode::Isbn => "isbn:",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Error returned when a search mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search mode: {0} (expected title, author or isbn)")]
pub struct ParseSearchModeError(pub String);

impl FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchMode::Title),
            "author" => Ok(SearchMode::Author),
            "isbn" => Ok(SearchMode::Isbn),
            other => Err(ParseSearchModeError(other.to_string())),
        }
    }
}

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Trimmed user query
    pub query: String,

    /// Field the query applies to
    pub mode: SearchMode,

    /// Maximum number of results to return (never above [`MAX_RESULTS`])
    pub max_results: usize,
}

impl CatalogQuery {
    /// Create a new query. The text is trimmed.
    pub fn new(query: impl AsRef<str>, mode: SearchMode) -> Self {
        Self {
            query: query.as_ref().trim().to_string(),
            mode,
            max_results: MAX_RESULTS,
        }
    }

    /// Set maximum results, clamped to the cap
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max.min(MAX_RESULTS);
        self
    }

    /// Whether there is anything to search for
    pub fn is_blank(&self) -> bool {
        self.query.is_empty()
    }

    /// Provider search term, e.g. `intitle:dune`
    pub fn term(&self) -> String {
        format!("{}{}", self.mode.prefix(), self.query)
    }
}
