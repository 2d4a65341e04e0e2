//! Lookup-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("City not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),
}

impl LookupError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid request: {}", msg),
            Self::NotFound(city) => format!("No match found for \"{}\". Check the spelling.", city),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Api(_) => "The weather service returned an unexpected response.".to_string(),
        }
    }
}
