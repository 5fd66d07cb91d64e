//! View projection.
//!
//! [`project`] turns the displayed set, the view mode and the selection into
//! a [`RenderSpec`]: display-ready strings and nothing else. It performs no
//! I/O and holds no state, so the same inputs always give the same output.

use serde::Serialize;

use crate::models::Book;

/// The two mutually exclusive rendering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Detail,
}

/// One row of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// 1-based position in the displayed set
    pub position: usize,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub rating: String,
    pub ebook_access: String,
}

/// Everything shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub title: String,
    pub author: String,
    pub first_publish_year: String,
    pub cover_url: String,
    pub isbn: String,
    pub ebook_access: String,
    pub rating: String,
}

/// A renderable description of the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum RenderSpec {
    List { entries: Vec<ListEntry> },
    Detail { book: DetailRecord },
}

impl RenderSpec {
    pub fn mode(&self) -> ViewMode {
        match self {
            RenderSpec::List { .. } => ViewMode::List,
            RenderSpec::Detail { .. } => ViewMode::Detail,
        }
    }

    /// List entries, empty for the detail view
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            RenderSpec::List { entries } => entries,
            RenderSpec::Detail { .. } => &[],
        }
    }
}

/// Build the render description for the current view.
///
/// # Panics
///
/// Panics when `mode` is [`ViewMode::Detail`] and nothing is selected.
pub fn project(displayed: &[&Book], mode: ViewMode, selected: Option<&Book>) -> RenderSpec {
    match mode {
        ViewMode::List => RenderSpec::List {
            entries: displayed
                .iter()
                .enumerate()
                .map(|(i, book)| list_entry(i + 1, book))
                .collect(),
        },
        ViewMode::Detail => {
            let book = selected.expect("detail view requires a selected book");
            RenderSpec::Detail {
                book: detail_record(book),
            }
        }
    }
}

fn list_entry(position: usize, book: &Book) -> ListEntry {
    ListEntry {
        position,
        title: book.title.clone(),
        author: book.author_name.clone(),
        cover_url: book.cover_url.clone(),
        rating: book.rating_raw.clone(),
        ebook_access: book.ebook_access.label().to_string(),
    }
}

fn detail_record(book: &Book) -> DetailRecord {
    DetailRecord {
        title: book.title.clone(),
        author: book.author_name.clone(),
        first_publish_year: book.first_publish_year.clone(),
        cover_url: book.cover_url.clone(),
        isbn: book.isbn.clone(),
        ebook_access: book.ebook_access.label().to_string(),
        rating: book.rating_raw.clone(),
    }
}
