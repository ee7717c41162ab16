//! View controller: turns user actions into Scryfall requests and request
//! outcomes into exactly one visible UI state.
//!
//! Every action takes a new request number. Only the outcome of the most
//! recent action is shown; anything older is logged and dropped, so
//! overlapping requests can finish in any order without a slow response
//! overwriting a newer one.

use crate::api::CardDataClient;
use crate::error::ApiError;
use crate::formatters::{prepare_set_catalog, CardView};
use crate::models::{Card, SetSummary};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a card name";

/// Output side of the controller. Each `show_*` call replaces whatever panel
/// was visible before.
pub trait Renderer: Send + Sync {
    fn show_loading(&self);
    fn show_card(&self, card: &CardView);
    fn show_error(&self, message: &str);
    fn show_no_results(&self);
    /// Nothing selected: hide every panel
    fn show_idle(&self);
    fn populate_set_options(&self, sets: &[SetSummary]);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    ShowingCard(Card),
    ShowingError(String),
    ShowingNoResults,
}

pub struct ViewController<C, R> {
    client: C,
    renderer: R,
    sets: OnceLock<Vec<SetSummary>>,
    state: Mutex<UiState>,
    latest_request: AtomicU64,
}

impl<C, R> ViewController<C, R>
where
    C: CardDataClient,
    R: Renderer,
{
    pub fn new(client: C, renderer: R) -> Self {
        Self {
            client,
            renderer,
            sets: OnceLock::new(),
            state: Mutex::new(UiState::Idle),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Physical sets, newest first. Empty until `initialize` succeeds.
    pub fn sets(&self) -> &[SetSummary] {
        self.sets.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn state(&self) -> UiState {
        self.lock_state().clone()
    }

    pub fn current_card(&self) -> Option<Card> {
        match &*self.lock_state() {
            UiState::ShowingCard(card) => Some(card.clone()),
            _ => None,
        }
    }

    /// Load the set catalog and fill the set selector
    pub async fn initialize(&self) {
        let request = self.begin_request();
        log::info!("Loading set catalog (request #{})", request);

        match self.client.list_sets().await {
            Ok(sets) => {
                let total = sets.len();
                let catalog = prepare_set_catalog(sets);
                log::info!(
                    "Loaded {} physical sets ({} digital skipped)",
                    catalog.len(),
                    total - catalog.len()
                );

                if self.sets.set(catalog).is_err() {
                    log::warn!("Set catalog already loaded, keeping the existing one");
                }
                self.renderer.populate_set_options(self.sets());
                self.set_ui_state(request, UiState::Idle);
            }
            Err(e) => {
                log::error!("Failed to load sets: {}", e);
                let message = failure_message("Failed to load Magic sets", &e, "Failed to load sets");
                // A newer action may have started while the catalog loaded. The
                // failure still replaces an idle or loading panel, but never a
                // card, result or error the user is looking at.
                let shown = self.write_state(request, UiState::ShowingError(message), |current| {
                    matches!(current, UiState::Idle | UiState::Loading)
                });
                if !shown {
                    log::warn!("Set selector stays empty; catalog failure not shown over newer result");
                }
            }
        }
    }

    /// Show a random card from any set
    pub async fn fetch_random_card(&self) {
        let request = self.begin_request();
        log::info!("Fetching random card (request #{})", request);

        let next = match self.client.random_card(None).await {
            Ok(card) => UiState::ShowingCard(card),
            Err(e) => {
                log::warn!("Random card request failed: {}", e);
                UiState::ShowingError(failure_message(
                    "Failed to fetch random card",
                    &e,
                    "Failed to fetch random card",
                ))
            }
        };
        self.set_ui_state(request, next);
    }

    /// Show a random card from the chosen set. An empty code means "no set
    /// selected" and just hides the card.
    pub async fn select_set(&self, set_code: &str) {
        let set_code = set_code.trim();
        if set_code.is_empty() {
            let request = self.next_request();
            log::debug!("Set selection cleared (request #{})", request);
            self.set_ui_state(request, UiState::Idle);
            return;
        }

        let request = self.begin_request();
        log::info!("Fetching random card from set {} (request #{})", set_code, request);

        let filter = format!("set:{}", set_code);
        let next = match self.client.random_card(Some(&filter)).await {
            Ok(card) => UiState::ShowingCard(card),
            Err(e) => {
                // Scryfall signals an empty set with a 404
                log::warn!("Random card from set {} failed: {}", set_code, e);
                UiState::ShowingError(failure_message(
                    "Failed to load card from set",
                    &e,
                    "No cards found in this set",
                ))
            }
        };
        self.set_ui_state(request, next);
    }

    /// Search by card name and show the first match
    pub async fn search_by_name(&self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            let request = self.next_request();
            self.set_ui_state(request, UiState::ShowingError(EMPTY_SEARCH_MESSAGE.to_string()));
            return;
        }

        let request = self.begin_request();
        log::info!("Searching for '{}' (request #{})", term, request);

        let next = match self.client.search_cards(term).await {
            Ok(results) => match results.first() {
                Some(card) => {
                    log::debug!("Search matched {} cards, showing {}", results.total_cards, card.name);
                    UiState::ShowingCard(card.clone())
                }
                None => UiState::ShowingNoResults,
            },
            Err(e) => {
                log::warn!("Search for '{}' failed: {}", term, e);
                UiState::ShowingError(failure_message(
                    "Failed to search for card",
                    &e,
                    "Failed to search for cards",
                ))
            }
        };
        self.set_ui_state(request, next);
    }

    fn next_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// New request number, with the loading panel shown
    fn begin_request(&self) -> u64 {
        let request = self.next_request();
        self.set_ui_state(request, UiState::Loading);
        request
    }

    /// Apply the outcome of `request`. Returns false when `request` has been
    /// superseded and the state was left alone.
    fn set_ui_state(&self, request: u64, next: UiState) -> bool {
        self.write_state(request, next, |_| false)
    }

    /// The only writer of UI state. A superseded `request` is applied only
    /// if `show_when_stale` accepts the state currently on screen.
    fn write_state<F>(&self, request: u64, next: UiState, show_when_stale: F) -> bool
    where
        F: FnOnce(&UiState) -> bool,
    {
        let mut state = self.lock_state();

        let latest = self.latest_request.load(Ordering::SeqCst);
        if request != latest && !show_when_stale(&state) {
            log::debug!(
                "Discarding outcome of request #{} (latest is #{})",
                request,
                latest
            );
            return false;
        }

        match &next {
            UiState::Idle => self.renderer.show_idle(),
            UiState::Loading => self.renderer.show_loading(),
            UiState::ShowingCard(card) => self.renderer.show_card(&CardView::new(card, self.sets())),
            UiState::ShowingError(message) => self.renderer.show_error(message),
            UiState::ShowingNoResults => self.renderer.show_no_results(),
        }
        *state = next;
        true
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, UiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// "{action}: {detail}", where non-success HTTP answers get a fixed detail and
/// everything else (network, decoding) reports the underlying error.
fn failure_message(action: &str, error: &ApiError, status_detail: &str) -> String {
    if error.is_status_failure() {
        format!("{}: {}", action, status_detail)
    } else {
        format!("{}: {}", action, error)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
