//! Weather provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Whether the provider answered but did not know the city.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound(_))
    }
}
