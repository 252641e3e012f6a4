use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// URL of the provider's 2x icon image for an icon id such as `"10d"`
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE_URL, icon)
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
}

impl WeatherSnapshot {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// One entry of the 3-hourly forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix timestamp (seconds, UTC)
    pub timestamp: i64,
    /// Provider label, e.g. `"2024-05-01 12:00:00"`
    pub label: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastSample {
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }
}

/// The full forecast series, in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: Option<String>,
    pub samples: Vec<ForecastSample>,
}

/// The representative sample chosen for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    /// Short weekday name, e.g. `"Mon"`
    pub weekday: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl DailySample {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

impl From<&ForecastSample> for DailySample {
    fn from(sample: &ForecastSample) -> Self {
        let time = sample.time();
        Self {
            date: time.date_naive(),
            weekday: time.format("%a").to_string(),
            temperature: sample.temperature,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
        }
    }
}

// Wire shapes of the OpenWeatherMap 2.5 API.

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMain {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentResponse {
    pub name: String,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub wind: Option<ApiWind>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastItem {
    pub dt: i64,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub dt_txt: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastResponse {
    #[serde(default)]
    pub list: Vec<ApiForecastItem>,
    pub city: Option<ApiCity>,
}

/// Error body; `cod` is a string or a number depending on the endpoint, so it is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

impl TryFrom<ApiCurrentResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(api: ApiCurrentResponse) -> Result<Self, Self::Error> {
        let condition = api
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("current response has no weather entry".into()))?;

        Ok(Self {
            name: api.name,
            temperature: api.main.temp,
            description: condition.description,
            icon: condition.icon,
            feels_like: api.main.feels_like,
            humidity: api.main.humidity,
            wind_speed: api.wind.map(|w| w.speed),
        })
    }
}

impl From<ApiForecastItem> for ForecastSample {
    fn from(item: ApiForecastItem) -> Self {
        let (description, icon) = item
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();

        Self {
            timestamp: item.dt,
            label: item.dt_txt,
            temperature: item.main.temp,
            description,
            icon,
        }
    }
}

impl From<ApiForecastResponse> for ForecastSeries {
    fn from(api: ApiForecastResponse) -> Self {
        Self {
            city: api.city.map(|c| c.name),
            samples: api.list.into_iter().map(ForecastSample::from).collect(),
        }
    }
}
