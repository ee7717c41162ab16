//! Scryfall API client
//!
//! Uses async reqwest for non-blocking HTTP requests.

use crate::api::CardDataClient;
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Card, SearchResults, SetSummary};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Scryfall set object (only the fields we use)
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallSet {
    pub code: String,
    pub name: String,
    /// Missing for a handful of unreleased/placeholder sets
    #[serde(default)]
    pub released_at: Option<NaiveDate>,
    #[serde(default)]
    pub digital: bool,
}

/// Scryfall list object wrapping the set catalog
#[derive(Debug, Deserialize)]
pub struct SetList {
    pub data: Vec<ScryfallSet>,
}

/// Scryfall card response
#[derive(Debug, Deserialize, Clone)]
pub struct ScryfallCard {
    pub name: String,
    pub set: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// For double-faced cards, images are in card_faces
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageUris {
    pub normal: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardFace {
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

impl ScryfallCard {
    /// Get the primary image URL (normal size)
    pub fn image_url(&self) -> Option<&str> {
        // Try direct image_uris first
        if let Some(ref uris) = self.image_uris {
            return uris.normal.as_deref();
        }
        // For double-faced cards, get front face image
        if let Some(ref faces) = self.card_faces {
            if let Some(face) = faces.first() {
                if let Some(ref uris) = face.image_uris {
                    return uris.normal.as_deref();
                }
            }
        }
        None
    }
}

impl From<ScryfallCard> for Card {
    fn from(card: ScryfallCard) -> Self {
        let image_url = card.image_url().map(str::to_string);
        Card {
            name: card.name,
            type_line: card.type_line,
            set_code: card.set,
            image_url,
            power: card.power,
            toughness: card.toughness,
            loyalty: card.loyalty,
            mana_cost: card.mana_cost,
            oracle_text: card.oracle_text,
            flavor_text: card.flavor_text,
            artist: card.artist,
        }
    }
}

/// Scryfall search response
#[derive(Debug, Deserialize)]
pub struct SearchList {
    #[serde(default)]
    pub total_cards: u32,
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
pub struct ScryfallError {
    pub status: u16,
    pub code: String,
    pub details: String,
}

/// Async client for the three Scryfall endpoints the browser uses
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against a different API root (mock servers in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> ApiResult<Self> {
        let config = AppConfig {
            base_url: base_url.into(),
            ..AppConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the set catalog. Sets without a release date are skipped.
    pub async fn fetch_sets(&self) -> ApiResult<Vec<SetSummary>> {
        let url = format!("{}/sets", self.base_url);
        let list: SetList = self.get_json(&url).await?;

        let total = list.data.len();
        let sets: Vec<SetSummary> = list
            .data
            .into_iter()
            .filter_map(|set| match set.released_at {
                Some(release_date) => Some(SetSummary {
                    code: set.code,
                    name: set.name,
                    release_date,
                    digital: set.digital,
                }),
                None => {
                    log::debug!("Skipping set {} without release date", set.code);
                    None
                }
            })
            .collect();

        log::info!("Fetched {} sets ({} without release date skipped)", sets.len(), total - sets.len());
        Ok(sets)
    }

    /// Fetch one random card, optionally filtered by a Scryfall query
    pub async fn fetch_random_card(&self, filter: Option<&str>) -> ApiResult<Card> {
        let url = match filter {
            Some(query) => format!(
                "{}/cards/random?q={}",
                self.base_url,
                urlencoding::encode(query)
            ),
            None => format!("{}/cards/random", self.base_url),
        };
        let card: ScryfallCard = self.get_json(&url).await?;
        Ok(card.into())
    }

    /// Search cards by name, one entry per distinct card.
    ///
    /// Scryfall answers a query without matches with a 404 carrying a
    /// `not_found` error object; that is reported as an empty result. Any
    /// other 404 stays an error.
    pub async fn search_cards_by_name(&self, name: &str) -> ApiResult<SearchResults> {
        let url = format!(
            "{}/cards/search?q={}&unique=cards",
            self.base_url,
            urlencoding::encode(name)
        );

        match self.get_json::<SearchList>(&url).await {
            Ok(list) => Ok(SearchResults {
                total_cards: list.total_cards,
                cards: list.data.into_iter().map(Card::from).collect(),
            }),
            Err(e) if e.is_not_found() => {
                log::debug!("Search for '{}' matched no cards", name);
                Ok(SearchResults::empty())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch card image bytes
    pub async fn fetch_image(&self, url: &str) -> ApiResult<Vec<u8>> {
        log::debug!("Fetching image: {}", url);

        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(ApiError::HttpStatus(response.status()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        log::info!("Fetching from Scryfall: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        match serde_json::from_slice::<ScryfallError>(&body) {
            Ok(error) => {
                log::warn!("Scryfall error {} ({}): {}", error.status, error.code, error.details);
                Err(ApiError::ApiResponse {
                    status: error.status,
                    code: error.code,
                    details: error.details,
                })
            }
            Err(_) => {
                log::warn!("Scryfall request failed with {}", status);
                Err(ApiError::HttpStatus(status))
            }
        }
    }
}

#[async_trait]
impl CardDataClient for ScryfallClient {
    async fn list_sets(&self) -> ApiResult<Vec<SetSummary>> {
        self.fetch_sets().await
    }

    async fn random_card(&self, filter: Option<&str>) -> ApiResult<Card> {
        self.fetch_random_card(filter).await
    }

    async fn search_cards(&self, query: &str) -> ApiResult<SearchResults> {
        self.search_cards_by_name(query).await
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
