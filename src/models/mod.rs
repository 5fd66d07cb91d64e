//! Core data models for catalog records and search operations.

mod book;
mod search;

pub use book::{
    coerce_rating, Book, BookBuilder, EbookAccess, DEFAULT_RATING, UNKNOWN_AUTHOR, UNKNOWN_ISBN,
    UNKNOWN_TITLE, UNKNOWN_YEAR,
};
pub use search::{CatalogQuery, ParseSearchModeError, SearchMode, MAX_RESULTS};
