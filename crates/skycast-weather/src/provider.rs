use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use skycast_core::{Units, WeatherConfig};
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{
    ApiCurrentResponse, ApiErrorBody, ApiForecastResponse, ForecastSeries, WeatherSnapshot,
};

/// Source of weather data, queried by city name
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    async fn forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError>;
}

/// OpenWeatherMap 2.5 API client
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl OpenWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units,
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} for '{}'", url, city);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| WeatherError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);

        Err(match status {
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::UNAUTHORIZED => WeatherError::InvalidApiKey,
            _ => WeatherError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let api: ApiCurrentResponse = self.get_json("weather", city).await?;
        WeatherSnapshot::try_from(api)
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        let api: ApiForecastResponse = self.get_json("forecast", city).await?;
        Ok(ForecastSeries::from(api))
    }
}
