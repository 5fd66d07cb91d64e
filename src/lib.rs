//! # Book Finder
//!
//! Search a remote book catalog, browse the results as a list, open a
//! single book's details, and narrow or reorder the last result set
//! locally without another network round trip.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Book, CatalogQuery, SearchMode)
//! - [`sources`]: Catalog sources and the query adapter that normalizes them
//! - [`controller`]: The result set state machine (filter, sort, selection)
//! - [`view`]: Pure projection of controller state into a render description
//! - [`app`]: Dispatcher mapping UI actions to transitions
//! - [`ui`]: Terminal rendering
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod app;
pub mod config;
pub mod controller;
pub mod models;
pub mod sources;
pub mod ui;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use app::{Dispatcher, UiAction};
pub use controller::ResultSetController;
pub use models::{Book, SearchMode};
pub use sources::{CatalogAdapter, CatalogSource};
pub use view::{project, RenderSpec, ViewMode};
