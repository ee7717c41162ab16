//! Error types for card_browser

use thiserror::Error;

/// Unified error type for Scryfall requests and client setup
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code without a Scryfall error body
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Scryfall returned an error object
    #[error("{code}: {details}")]
    ApiResponse {
        status: u16,
        code: String,
        details: String,
    },
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the API answered, but with a non-success status.
    pub fn is_status_failure(&self) -> bool {
        matches!(
            self,
            ApiError::HttpStatus(_) | ApiError::ApiResponse { .. }
        )
    }

    /// True only for Scryfall's own `not_found` error object (also used for
    /// empty searches). A bare 404 without that body is not one.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ApiResponse { code, .. } if code == "not_found")
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
