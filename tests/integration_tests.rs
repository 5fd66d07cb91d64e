//! Integration tests for Book Finder
//!
//! These tests drive the dispatcher the way the front end does: UI actions
//! in, render descriptions out, with the catalog behind a mock source or a
//! local HTTP server.

use book_finder::app::{Dispatcher, Outcome, UiAction};
use book_finder::models::{Book, SearchMode};
use book_finder::sources::mock::make_book;
use book_finder::sources::{CatalogAdapter, GoogleBooksSource, MockSource, SourceError};
use book_finder::utils::HttpClient;
use book_finder::view::{RenderSpec, ViewMode};
use std::sync::Arc;
use std::time::Duration;

fn titles(spec: &RenderSpec) -> Vec<&str> {
    spec.entries().iter().map(|e| e.title.as_str()).collect()
}

fn mock_adapter(books: Vec<Book>) -> (Arc<MockSource>, CatalogAdapter) {
    let source = Arc::new(MockSource::new());
    source.set_books(books);
    let adapter = CatalogAdapter::new(source.clone());
    (source, adapter)
}

fn render_of(outcome: Outcome) -> RenderSpec {
    match outcome {
        Outcome::Render(spec) => spec,
        other => panic!("expected a render, got {:?}", other),
    }
}

/// Adapter returns X(4.5) and Y("undefined"); sorting puts X first and
/// leaves Y's rating text alone.
#[tokio::test]
async fn test_sort_with_non_numeric_rating() {
    let (_, adapter) = mock_adapter(vec![
        make_book("Y", "undefined", false),
        make_book("X", "4.5", false),
    ]);
    let mut dispatcher = Dispatcher::new();

    dispatcher.search(&adapter, "anything", SearchMode::Title).await.unwrap();
    let spec = render_of(dispatcher.dispatch(UiAction::SortByRating));

    assert_eq!(titles(&spec), vec!["X", "Y"]);
    assert_eq!(spec.entries()[0].rating, "4.5");
    assert_eq!(spec.entries()[1].rating, "undefined");
}

/// Filtering on then off restores the full set in its original order.
#[tokio::test]
async fn test_filter_on_then_off() {
    let (_, adapter) = mock_adapter(vec![make_book("A", "1", true), make_book("B", "2", false)]);
    let mut dispatcher = Dispatcher::new();
    dispatcher.search(&adapter, "q", SearchMode::Title).await.unwrap();

    let spec = render_of(dispatcher.dispatch(UiAction::ToggleEbookFilter(true)));
    assert_eq!(titles(&spec), vec!["A"]);

    let spec = render_of(dispatcher.dispatch(UiAction::ToggleEbookFilter(false)));
    assert_eq!(titles(&spec), vec!["A", "B"]);
}

/// A blank query makes no adapter call and leaves the view alone.
#[tokio::test]
async fn test_blank_query_makes_no_call() {
    let (source, adapter) = mock_adapter(vec![make_book("A", "1", true)]);
    let mut dispatcher = Dispatcher::new();
    dispatcher.search(&adapter, "first", SearchMode::Title).await.unwrap();
    let before = dispatcher.render();

    assert!(dispatcher.search(&adapter, "   ", SearchMode::Author).await.is_none());
    assert_eq!(source.call_count(), 1);
    assert_eq!(dispatcher.render(), before);
}

/// A response without an items field shows an empty list, not an error.
#[tokio::test]
async fn test_response_without_items() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/volumes")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"kind": "books#volumes", "totalItems": 0}"#)
        .create_async()
        .await;

    let client = HttpClient::with_settings("book-finder-test", Duration::from_secs(5)).unwrap();
    let source = GoogleBooksSource::with_client(client, format!("{}/volumes", server.url()));
    let adapter = CatalogAdapter::new(Arc::new(source));

    assert!(adapter.try_search("nothing", SearchMode::Title).await.unwrap().is_empty());

    let mut dispatcher = Dispatcher::new();
    let spec = dispatcher
        .search(&adapter, "nothing", SearchMode::Title)
        .await
        .unwrap();
    assert_eq!(spec.mode(), ViewMode::List);
    assert!(spec.entries().is_empty());
}

/// Filtering out the selected book leaves the detail view.
#[tokio::test]
async fn test_filter_exits_detail_view() {
    let (_, adapter) = mock_adapter(vec![make_book("A", "3", false), make_book("B", "4", true)]);
    let mut dispatcher = Dispatcher::new();
    dispatcher.search(&adapter, "q", SearchMode::Title).await.unwrap();

    let detail = render_of(dispatcher.dispatch(UiAction::SelectItem(0)));
    match &detail {
        RenderSpec::Detail { book } => assert_eq!(book.title, "A"),
        other => panic!("expected detail view, got {:?}", other),
    }

    let spec = render_of(dispatcher.dispatch(UiAction::ToggleEbookFilter(true)));
    assert_eq!(spec.mode(), ViewMode::List);
    assert_eq!(titles(&spec), vec!["B"]);
    assert!(dispatcher.controller().selected().is_none());
}

/// Every new search replaces the previous set.
#[tokio::test]
async fn test_new_search_replaces_results() {
    let source = Arc::new(MockSource::new());
    let adapter = CatalogAdapter::new(source.clone());
    let mut dispatcher = Dispatcher::new();

    source.set_books(vec![make_book("Old 1", "1", true), make_book("Old 2", "2", true)]);
    dispatcher.search(&adapter, "old", SearchMode::Title).await.unwrap();

    source.set_books(vec![make_book("New", "5", false)]);
    let spec = dispatcher.search(&adapter, "new", SearchMode::Title).await.unwrap();

    assert_eq!(titles(&spec), vec!["New"]);
    assert_eq!(dispatcher.controller().current_set().len(), 1);
}

/// A failing catalog looks like zero matches.
#[tokio::test]
async fn test_failed_search_shows_empty_list() {
    let source = Arc::new(MockSource::new());
    source.set_error(SourceError::Network("timed out".to_string()));
    let adapter = CatalogAdapter::new(source);
    let mut dispatcher = Dispatcher::new();

    let spec = dispatcher.search(&adapter, "dune", SearchMode::Title).await.unwrap();
    assert!(spec.entries().is_empty());
}

/// Out-of-order completions: the last submitted search wins.
#[tokio::test]
async fn test_overlapping_searches_last_submitted_wins() {
    let mut dispatcher = Dispatcher::new();

    let submit = |dispatcher: &mut Dispatcher, query: &str| match dispatcher.dispatch(
        UiAction::SubmitSearch {
            query: query.to_string(),
            mode: SearchMode::Author,
        },
    ) {
        Outcome::Search(ticket) => ticket,
        other => panic!("expected a search, got {:?}", other),
    };

    let slow = submit(&mut dispatcher, "slow");
    let fast = submit(&mut dispatcher, "fast");

    assert!(dispatcher
        .complete_search(fast, vec![make_book("Fast", "1", false)])
        .is_some());
    assert!(dispatcher
        .complete_search(slow, vec![make_book("Slow", "1", false)])
        .is_none());

    assert_eq!(titles(&dispatcher.render()), vec!["Fast"]);
}

/// Sort, then open a book, then go back: the sorted order is still shown.
#[tokio::test]
async fn test_back_to_list_keeps_sorted_order() {
    let (_, adapter) = mock_adapter(vec![
        make_book("Low", "2", true),
        make_book("High", "4.8", true),
        make_book("Mid", "3.9", false),
    ]);
    let mut dispatcher = Dispatcher::new();
    dispatcher.search(&adapter, "q", SearchMode::Title).await.unwrap();
    dispatcher.dispatch(UiAction::SortByRating);

    let detail = render_of(dispatcher.dispatch(UiAction::SelectItem(0)));
    assert_eq!(detail.mode(), ViewMode::Detail);

    let spec = render_of(dispatcher.dispatch(UiAction::BackToList));
    assert_eq!(titles(&spec), vec!["High", "Mid", "Low"]);
}
