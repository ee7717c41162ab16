//! MTG Card Browser
//!
//! Desktop front-end for the Scryfall card API: draw a random card, draw a
//! random card from a chosen set, or search by name, and view the result.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod models;
pub mod ui;

// Re-export commonly used items
pub use api::{CardDataClient, ScryfallClient};
pub use config::AppConfig;
pub use controller::{Renderer, UiState, ViewController};
pub use error::{ApiError, ApiResult};
pub use formatters::{CardView, StatRow};
pub use models::{Card, SearchResults, SetOption, SetSummary};
