//! Card data sources

pub mod scryfall;

use crate::error::ApiResult;
use crate::models::{Card, SearchResults, SetSummary};
use async_trait::async_trait;

pub use scryfall::ScryfallClient;

/// Read-only queries the view controller issues.
///
/// Implemented by [`ScryfallClient`] for the real API and by in-memory fakes
/// in tests.
#[async_trait]
pub trait CardDataClient: Send + Sync {
    /// The full set catalog, in API order and unfiltered
    async fn list_sets(&self) -> ApiResult<Vec<SetSummary>>;

    /// One random card, optionally restricted by a search query (e.g. `set:neo`)
    async fn random_card(&self, filter: Option<&str>) -> ApiResult<Card>;

    /// Name search with one result per distinct card
    async fn search_cards(&self, query: &str) -> ApiResult<SearchResults>;
}
