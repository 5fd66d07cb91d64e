//! Book model representing a normalized catalog record.

use serde::{Deserialize, Serialize};

/// Title used when the provider omits one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author line used when the provider lists no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// ISBN used when the provider has no industry identifier.
pub const UNKNOWN_ISBN: &str = "N/A";

/// Year used when the publication date is missing.
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// Rating text used when the provider has no average rating.
pub const DEFAULT_RATING: &str = "0";

/// Whether a book can be read as an e-book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EbookAccess {
    Available,
    NotAvailable,
}

impl EbookAccess {
    /// Map the provider's epub availability flag
    pub fn from_flag(available: bool) -> Self {
        if available {
            EbookAccess::Available
        } else {
            EbookAccess::NotAvailable
        }
    }

    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            EbookAccess::Available => "Available",
            EbookAccess::NotAvailable => "Not Available",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, EbookAccess::Available)
    }
}

impl std::fmt::Display for EbookAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A book from the remote catalog
///
/// Every field is populated: provider gaps are filled with the sentinel
/// values above when the record is normalized, so consumers never need to
/// handle missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Book title
    pub title: String,

    /// Authors (comma-separated)
    pub author_name: String,

    /// First industry identifier reported by the provider
    pub isbn: String,

    /// Cover thumbnail URL (empty when there is none)
    pub cover_url: String,

    /// E-book availability
    pub ebook_access: EbookAccess,

    /// Year of first publication
    pub first_publish_year: String,

    /// Average rating exactly as the provider sent it
    pub rating_raw: String,
}

impl Book {
    /// Numeric rating used for ordering.
    ///
    /// Parses the leading decimal number of `rating_raw`. Anything that does
    /// not start with a number (`"undefined"`, `""`, `"unknown"`) counts as
    /// zero. The stored text is never changed.
    pub fn rating_value(&self) -> f64 {
        coerce_rating(&self.rating_raw)
    }

    /// Whether the book passes the e-book filter
    pub fn has_ebook(&self) -> bool {
        self.ebook_access.is_available()
    }
}

/// Parse the leading float of a rating string, falling back to zero.
///
/// Accepts an optional sign, a decimal mantissa, an optional exponent and
/// the literal `Infinity`; anything after the longest such prefix is ignored.
pub fn coerce_rating(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    match text[..end].trim_end_matches('.').parse::<f64>() {
        Ok(value) if value != 0.0 && !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Builder for constructing Book objects
///
/// Starts from the sentinel values so a partially described record still
/// builds into a complete `Book`.
#[derive(Debug, Clone)]
pub struct BookBuilder {
    book: Book,
}

impl Default for BookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookBuilder {
    pub fn new() -> Self {
        Self {
            book: Book {
                title: UNKNOWN_TITLE.to_string(),
                author_name: UNKNOWN_AUTHOR.to_string(),
                isbn: UNKNOWN_ISBN.to_string(),
                cover_url: String::new(),
                ebook_access: EbookAccess::NotAvailable,
                first_publish_year: UNKNOWN_YEAR.to_string(),
                rating_raw: DEFAULT_RATING.to_string(),
            },
        }
    }

    /// Set title (an empty title keeps the sentinel)
    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.is_empty() {
            self.book.title = title;
        }
        self
    }

    /// Set authors from a list, joined with ", "
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = authors
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            self.book.author_name = joined;
        }
        self
    }

    /// Set ISBN
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.book.isbn = isbn.into();
        self
    }

    /// Set cover URL
    pub fn cover_url(mut self, url: impl Into<String>) -> Self {
        self.book.cover_url = url.into();
        self
    }

    /// Set e-book access
    pub fn ebook_access(mut self, access: EbookAccess) -> Self {
        self.book.ebook_access = access;
        self
    }

    /// Set the publication year from a date such as "2004-05-01"
    pub fn published_date(mut self, date: &str) -> Self {
        if let Some(year) = date.split('-').next().filter(|y| !y.is_empty()) {
            self.book.first_publish_year = year.to_string();
        }
        self
    }

    /// Set the raw rating text
    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.book.rating_raw = rating.into();
        self
    }

    /// Build the Book
    pub fn build(self) -> Book {
        self.book
    }
}
