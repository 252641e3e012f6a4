use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHER_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// One problem found in the config, keyed by its dotted field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of [`Config::validate`]. Warnings never block startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigReport {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ConfigReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }

    fn warn(&mut self, field: &'static str, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }

    /// All errors on one line
    pub fn summary(&self) -> String {
        let issues: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        issues.join("; ")
    }
}

/// Measurement system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the provider's `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric | Self::Standard => "m/s",
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            "standard" => Ok(Self::Standard),
            other => Err(format!(
                "unknown units '{}', expected metric, imperial or standard",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key (overridden by OPENWEATHER_API_KEY)
    pub api_key: String,

    /// Base URL of the provider's 2.5 API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Measurement system
    #[serde(default)]
    pub units: Units,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl WeatherConfig {
    /// Check if an API key is configured (not a placeholder)
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            base_url: default_base_url(),
            units: Units::Metric,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted search state
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skycast")
}

impl StorageConfig {
    pub fn state_db_path(&self) -> PathBuf {
        self.data_dir.join("state.db")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, writing defaults there if it is missing.
    ///
    /// The API key from the environment wins over the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&contents).map_err(|e| {
                ConfigError::ParseError(format!("{}: {}", path.display(), e))
            })?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Load configuration from `path` (or the default location) and validate it.
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let report = config.validate();

        if !report.is_valid() {
            return Err(ConfigError::Invalid(report.summary()).into());
        }

        for warning in &report.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    pub fn validate(&self) -> ConfigReport {
        let mut result = ConfigReport::default();

        Self::validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.timeout_secs == 0 {
            result.error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 300 {
            result.warn(
                "weather.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            );
        }

        if !self.weather.has_api_key() {
            result.warn(
                "weather.api_key",
                format!(
                    "No API key configured - set it in the config file or {}",
                    API_KEY_ENV
                ),
            );
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            result.error("storage.data_dir", "Data directory must not be empty");
        } else if self.storage.data_dir.exists() && !self.storage.data_dir.is_dir() {
            result.error(
                "storage.data_dir",
                format!(
                    "Path is not a directory: {}",
                    self.storage.data_dir.display()
                ),
            );
        }

        result
    }

    fn validate_url(url_str: &str, field_name: &'static str, result: &mut ConfigReport) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                if url.host().is_none() {
                    result.error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Default location of the configuration file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_api_key_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_base_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://api.example.com".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.weather.timeout_secs = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\napi_key = \"abc123\"\nunits = \"imperial\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.units, Units::Imperial);
        assert_eq!(config.weather.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.weather.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::load_from(&path).unwrap();
        assert!(path.exists());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[weather]"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\napi_key = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_file_fails_validated_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\napi_key = \"k\"\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_units_parse_and_symbols() {
        assert_eq!("Imperial".parse::<Units>().unwrap(), Units::Imperial);
        assert!("kelvin".parse::<Units>().is_err());
        assert_eq!(Units::Metric.temperature_symbol(), "°C");
        assert_eq!(Units::Standard.as_query(), "standard");
    }

    #[test]
    fn test_report_summary_lists_errors() {
        let mut result = ConfigReport::default();
        result.error("field1", "error1");
        result.error("field2", "error2");
        let summary = result.summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
