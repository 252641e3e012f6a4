//! Weather data for SkyCast.
//!
//! Current conditions and the 5-day/3-hour forecast from OpenWeatherMap,
//! plus the policy that picks one representative sample per day.

pub mod error;
pub mod forecast;
pub mod provider;
pub mod types;

pub use error::WeatherError;
pub use forecast::{select_forecast_days, FORECAST_DAYS, MIDDAY_MARKER};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use types::*;
