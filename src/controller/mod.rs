//! Result set state machine.
//!
//! [`ResultSetController`] owns the books returned by the last search and
//! the user's filter/sort/selection choices. The list the user sees, the
//! *displayed set*, is never stored: it is recomputed from the current set,
//! the e-book filter flag and the sort flag whenever it is asked for, so
//! filter and sort results cannot drift apart.
//!
//! # Transitions
//!
//! | Transition          | Displayed set                    | Selection |
//! |---------------------|----------------------------------|-----------|
//! | `new_search`        | filter(books)                    | cleared   |
//! | `toggle_filter`     | filter(current), sort dropped    | cleared   |
//! | `sort_by_rating`    | stable sort of what was shown    | cleared   |
//! | `select_book`       | unchanged                        | set       |
//! | `show_list`         | unchanged                        | cleared   |
//!
//! Sorting is a one-shot action on the current view. A later filter toggle
//! or search shows the unsorted order again.

use std::cmp::Ordering;

use crate::models::Book;
use crate::view::ViewMode;

/// Owner of the current result set and the derived view state.
#[derive(Debug, Clone, Default)]
pub struct ResultSetController {
    /// Books from the last applied search, in provider order.
    current_set: Vec<Book>,

    /// Whether only e-books are shown.
    ebook_filter_active: bool,

    /// Whether the displayed set is ordered by rating.
    sort_active: bool,

    /// Book shown in the detail view.
    selected: Option<Book>,
}

impl ResultSetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new search result.
    ///
    /// Replaces the current set wholesale. `filter_active` is the filter
    /// toggle's value at the time the result arrives; it is applied to the
    /// new set. Any sort and selection are dropped.
    pub fn new_search(&mut self, books: Vec<Book>, filter_active: bool) {
        self.current_set = books;
        self.ebook_filter_active = filter_active;
        self.sort_active = false;
        self.selected = None;

        tracing::debug!(
            fetched = self.current_set.len(),
            displayed = self.displayed_len(),
            filter = filter_active,
            "Installed new result set"
        );
    }

    /// Turn the e-book filter on or off.
    pub fn toggle_filter(&mut self, active: bool) {
        self.ebook_filter_active = active;
        self.sort_active = false;
        self.selected = None;

        tracing::debug!(
            filter = active,
            displayed = self.displayed_len(),
            "Toggled e-book filter"
        );
    }

    /// Order the displayed set by rating, highest first.
    ///
    /// Respects the filter state at the time of the call. Books with equal
    /// ratings keep their relative order.
    pub fn sort_by_rating(&mut self) {
        self.sort_active = true;
        self.selected = None;

        tracing::debug!(displayed = self.displayed_len(), "Sorted by rating");
    }

    /// Open the detail view for `book`.
    ///
    /// # Panics
    ///
    /// Panics if `book` is not part of the displayed set. UI wiring can only
    /// offer displayed books, so anything else is a bug in the caller.
    pub fn select_book(&mut self, book: &Book) {
        assert!(
            self.displayed_iter().any(|b| b == book),
            "selected book {:?} is not in the displayed set",
            book.title
        );

        self.selected = Some(book.clone());
        tracing::debug!(title = %book.title, "Selected book");
    }

    /// Leave the detail view. Filter and sort are unchanged.
    pub fn show_list(&mut self) {
        self.selected = None;
    }

    /// Books from the last applied search, unfiltered and unsorted.
    pub fn current_set(&self) -> &[Book] {
        &self.current_set
    }

    pub fn ebook_filter_active(&self) -> bool {
        self.ebook_filter_active
    }

    pub fn sort_active(&self) -> bool {
        self.sort_active
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    /// Detail while a book is selected, list otherwise.
    pub fn view_mode(&self) -> ViewMode {
        if self.selected.is_some() {
            ViewMode::Detail
        } else {
            ViewMode::List
        }
    }

    /// The set the user sees.
    pub fn displayed(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.displayed_iter().collect();
        if self.sort_active {
            // `sort_by` is stable, which gives the tie-break order.
            books.sort_by(|a, b| compare_rating_desc(a, b));
        }
        books
    }

    /// Book at a zero-based position in the displayed set.
    pub fn displayed_at(&self, index: usize) -> Option<&Book> {
        self.displayed().get(index).copied()
    }

    fn displayed_len(&self) -> usize {
        self.displayed_iter().count()
    }

    fn displayed_iter(&self) -> impl Iterator<Item = &Book> {
        let filter = self.ebook_filter_active;
        self.current_set
            .iter()
            .filter(move |book| !filter || book.has_ebook())
    }
}

/// Descending by coerced rating.
fn compare_rating_desc(a: &Book, b: &Book) -> Ordering {
    b.rating_value()
        .partial_cmp(&a.rating_value())
        .unwrap_or(Ordering::Equal)
}
