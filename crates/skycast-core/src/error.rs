//! Centralized error types for SkyCast.
//!
//! Every error converts into [`AppError`]; `user_message()` gives the text
//! shown to the user while `Display` keeps the full detail for logs.

use thiserror::Error;

/// Message shown for any failed weather lookup.
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please check spelling.";

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Recover the typed error behind an `anyhow::Error`, if there is one.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return AppError::Config(e),
            Err(err) => err,
        };
        let err = match err.downcast::<StorageError>() {
            Ok(e) => return AppError::Storage(e),
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(e) => AppError::Io(e),
            Err(err) => AppError::Other(err),
        }
    }

    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.user_message(),
            AppError::Fetch(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Rejected search input. Detected locally, never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty city name")]
    Empty,

    #[error("city name shorter than {min} characters")]
    TooShort { min: usize },
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::Empty => "Please enter a city name.",
            ValidationError::TooShort { .. } => "City name is too short.",
        }
    }
}

/// Which half of the joined lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Current,
    Forecast,
}

impl std::fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchTarget::Current => write!(f, "current conditions"),
            FetchTarget::Forecast => write!(f, "forecast"),
        }
    }
}

/// Failed weather lookup. Network failures and unknown cities share one
/// user-facing message; the detail is kept for logging.
#[derive(Debug, Clone, Error)]
#[error("{target} request for '{city}' failed: {detail}")]
pub struct FetchError {
    pub city: String,
    pub target: FetchTarget,
    pub detail: String,
}

impl FetchError {
    pub fn new(city: impl Into<String>, target: FetchTarget, detail: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            target,
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        CITY_NOT_FOUND_MESSAGE
    }
}

/// Persistent key-value store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Open(_) => "Unable to access saved searches. Try restarting the app.",
            StorageError::Query(_) => "Saving your searches failed. Please try again.",
            StorageError::Corrupt { .. } => "Saved searches were unreadable and have been reset.",
            StorageError::Serialize(_) => "Saving your searches failed. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_distinguish_causes() {
        assert_eq!(ValidationError::Empty.user_message(), "Please enter a city name.");
        assert_eq!(
            ValidationError::TooShort { min: 2 }.user_message(),
            "City name is too short."
        );
    }

    #[test]
    fn test_fetch_error_collapses_to_generic_message() {
        let not_found = FetchError::new("Atlantis", FetchTarget::Current, "404 Not Found");
        let network = FetchError::new("Paris", FetchTarget::Forecast, "connection refused");
        assert_eq!(not_found.user_message(), network.user_message());
        assert_eq!(network.user_message(), CITY_NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_fetch_error_display_keeps_detail() {
        let err = FetchError::new("Paris", FetchTarget::Forecast, "connection refused");
        let text = err.to_string();
        assert!(text.contains("forecast"));
        assert!(text.contains("Paris"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = ValidationError::Empty.into();
        assert!(matches!(app_err, AppError::Validation(ValidationError::Empty)));
        assert_eq!(app_err.user_message(), "Please enter a city name.");
    }

    #[test]
    fn test_from_anyhow_recovers_typed_errors() {
        let err = anyhow::Error::from(ConfigError::ParseError("bad".into()));
        assert!(matches!(
            AppError::from_anyhow(err),
            AppError::Config(ConfigError::ParseError(_))
        ));

        let err = anyhow::Error::from(StorageError::Open("locked".into()))
            .context("Failed to open state store");
        assert!(matches!(
            AppError::from_anyhow(err),
            AppError::Storage(StorageError::Open(_))
        ));

        let err = anyhow::anyhow!("something else");
        assert!(matches!(AppError::from_anyhow(err), AppError::Other(_)));
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            AppError::Storage(StorageError::Query("x".into())),
            AppError::Config(ConfigError::Invalid("x".into())),
            AppError::Fetch(FetchError::new("x", FetchTarget::Current, "x")),
            AppError::Other(anyhow::anyhow!("x")),
        ];
        for err in &errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }
}
