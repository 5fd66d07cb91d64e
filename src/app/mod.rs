//! Dispatcher tying UI actions, the controller and the projector together.
//!
//! The dispatcher is the single actor that mutates a
//! [`ResultSetController`]. Every [`UiAction`] maps to one controller
//! transition followed by a projection. Searches are split in two halves
//! because the network call happens elsewhere:
//!
//! 1. [`Dispatcher::dispatch`] with [`UiAction::SubmitSearch`] hands back a
//!    [`SearchTicket`] (or ignores a blank query).
//! 2. The caller runs the query and reports the books through
//!    [`Dispatcher::complete_search`].
//!
//! Tickets carry a sequence number. Only the most recently issued ticket is
//! applied, so when two searches overlap the one the user submitted last
//! wins no matter which response arrives first.

mod command;

pub use command::{parse_command, Command, CommandError, HELP_TEXT};

use crate::controller::ResultSetController;
use crate::models::{Book, CatalogQuery, SearchMode};
use crate::sources::CatalogAdapter;
use crate::view::{project, RenderSpec};

/// User intents, independent of any widget toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Search the catalog
    SubmitSearch { query: String, mode: SearchMode },

    /// Check or uncheck the e-book filter
    ToggleEbookFilter(bool),

    /// Press the sort-by-rating button
    SortByRating,

    /// Open the book at a zero-based position in the list
    SelectItem(usize),

    /// Leave the detail view
    BackToList,
}

/// Handle of an in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: CatalogQuery,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query.query
    }

    pub fn mode(&self) -> SearchMode {
        self.query.mode
    }
}

/// Result of dispatching a UI action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The view changed
    Render(RenderSpec),

    /// A search must be run; report it back with `complete_search`
    Search(SearchTicket),

    /// No-op, the view is unchanged (blank query)
    Unchanged,

    /// The action does not apply to the current view
    Rejected(String),
}

/// Single owner of the result set state.
#[derive(Debug, Default)]
pub struct Dispatcher {
    controller: ResultSetController,
    filter_toggle: bool,
    last_issued: u64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> &ResultSetController {
        &self.controller
    }

    /// Current value of the e-book filter toggle
    pub fn filter_toggle(&self) -> bool {
        self.filter_toggle
    }

    /// Whether `ticket` is still the most recent search
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.last_issued
    }

    /// Project the current state.
    pub fn render(&self) -> RenderSpec {
        let displayed = self.controller.displayed();
        project(
            &displayed,
            self.controller.view_mode(),
            self.controller.selected(),
        )
    }

    /// Apply one UI action.
    pub fn dispatch(&mut self, action: UiAction) -> Outcome {
        match action {
            UiAction::SubmitSearch { query, mode } => {
                let query = CatalogQuery::new(query, mode);
                if query.is_blank() {
                    tracing::debug!("Ignoring blank query");
                    return Outcome::Unchanged;
                }

                self.last_issued += 1;
                tracing::info!(seq = self.last_issued, term = %query.term(), "Search submitted");
                Outcome::Search(SearchTicket {
                    seq: self.last_issued,
                    query,
                })
            }
            UiAction::ToggleEbookFilter(active) => {
                self.filter_toggle = active;
                self.controller.toggle_filter(active);
                Outcome::Render(self.render())
            }
            UiAction::SortByRating => {
                self.controller.sort_by_rating();
                Outcome::Render(self.render())
            }
            UiAction::SelectItem(index) => {
                let Some(book) = self.controller.displayed_at(index).cloned() else {
                    return Outcome::Rejected(format!("No book at position {}", index + 1));
                };
                self.controller.select_book(&book);
                Outcome::Render(self.render())
            }
            UiAction::BackToList => {
                self.controller.show_list();
                Outcome::Render(self.render())
            }
        }
    }

    /// Apply the books fetched for `ticket`.
    ///
    /// Returns `None` when a newer search has been submitted since; the
    /// stale books are dropped and the view is left alone.
    pub fn complete_search(&mut self, ticket: SearchTicket, books: Vec<Book>) -> Option<RenderSpec> {
        if !self.is_current(&ticket) {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.last_issued,
                "Discarding stale search result"
            );
            return None;
        }

        self.controller.new_search(books, self.filter_toggle);
        Some(self.render())
    }

    /// Submit a search and wait for it in place.
    ///
    /// Returns `None` for a blank query, which makes no network call.
    pub async fn search(
        &mut self,
        adapter: &CatalogAdapter,
        query: &str,
        mode: SearchMode,
    ) -> Option<RenderSpec> {
        let outcome = self.dispatch(UiAction::SubmitSearch {
            query: query.to_string(),
            mode,
        });

        match outcome {
            Outcome::Search(ticket) => {
                let books = adapter.search(ticket.query(), ticket.mode()).await;
                self.complete_search(ticket, books)
            }
            _ => None,
        }
    }
}
