//! Utility modules shared by the catalog sources.
//!
//! - [`HttpClient`]: reqwest client with the crate user agent and timeouts

mod http;

pub use http::{default_user_agent, HttpClient, DEFAULT_TIMEOUT};
