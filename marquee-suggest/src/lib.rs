//! Typed client for IMDb's undocumented search-suggestion endpoint.
//!
//! The endpoint powers the search-as-you-type box on imdb.com: it accepts at
//! most 20 characters of cleaned query text and answers with a JSON payload
//! wrapped in a JavaScript callback envelope. This crate normalizes free-text
//! queries into the endpoint's accepted form, drives a retry loop that
//! progressively shortens the query when nothing matches, unwraps and decodes
//! the response, and scores every candidate against the original query.
//! Title results can optionally be enriched with rating and genres scraped
//! from their detail page.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), marquee_suggest::SuggestError> {
//! use marquee_suggest::{SearchRequest, SuggestClient};
//!
//! let client = SuggestClient::new()?;
//! let results = client.search(&SearchRequest::new("Captain").top(5)).await?;
//! for result in &results {
//!     println!("{result}");
//! }
//! # Ok(()) }
//! ```
//!
//! Callers only ever see a (possibly empty) ordered result list or a
//! configuration error; transient network and parse failures are absorbed by
//! the retry loop and logged.

use thiserror::Error;

mod client;
mod envelope;
pub mod detail;
pub mod normalize;
pub mod score;
mod types;

pub use client::{SuggestClient, SUGGEST_BASE};
pub use detail::{DetailFetcher, TitleDetails, TitlePageFetcher};
pub use types::{Category, EntityKind, SearchRequest, SuggestionResult};

/// Errors surfaced to callers.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Bad caller-supplied configuration (unknown category, bad base URL).
    /// Raised before any network activity.
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error(transparent)]
    Http(#[from] marquee_http::HttpError),
}

/// Convenient alias for results that use [`SuggestError`].
pub type Result<T> = std::result::Result<T, SuggestError>;
