//! Search orchestration.
//!
//! A search validates the input, runs the current-conditions and forecast
//! requests together, and on success records the city in the recent-searches
//! list and as the last viewed city. Each fetch takes a ticket from a request
//! sequence; a fetch that completes after a newer one started is discarded.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use skycast_core::{FetchError, FetchTarget, ValidationError};
use skycast_services::{SearchHistory, SessionStore};
use skycast_weather::{
    select_forecast_days, DailySample, WeatherError, WeatherProvider, WeatherSnapshot,
};

use crate::view::{SearchControl, WeatherView};

/// Shortest accepted city name, in characters
pub const MIN_CITY_LENGTH: usize = 2;

pub const CLEAR_HISTORY_PROMPT: &str = "Clear all recent searches?";

/// Trim `raw` and check it is long enough to send to the provider.
pub fn validate_city(raw: &str) -> Result<&str, ValidationError> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(ValidationError::Empty);
    }
    if city.chars().count() < MIN_CITY_LENGTH {
        return Err(ValidationError::TooShort {
            min: MIN_CITY_LENGTH,
        });
    }
    Ok(city)
}

/// Everything shown for a successful search
#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// City as queried
    pub city: String,
    pub current: WeatherSnapshot,
    pub days: Vec<DailySample>,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Success(WeatherReport),
    Failed(FetchError),
    /// A newer search started before this one finished; nothing was shown.
    Superseded,
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

pub struct SearchController {
    provider: Arc<dyn WeatherProvider>,
    session: SessionStore,
    view: Arc<dyn WeatherView>,
    history: Mutex<SearchHistory>,
    latest_request: AtomicU64,
}

impl SearchController {
    /// Build the controller; the persisted history is read here, once.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        session: SessionStore,
        view: Arc<dyn WeatherView>,
    ) -> Self {
        let history = session.load_history();
        tracing::debug!("Loaded {} recent searches", history.len());

        Self {
            provider,
            session,
            view,
            history: Mutex::new(history),
            latest_request: AtomicU64::new(0),
        }
    }

    /// Handle text from the input surface.
    ///
    /// # Errors
    /// Returns the validation failure (already shown to the user) when the
    /// trimmed input is empty or too short; no request is made.
    pub async fn submit_search(&self, raw_input: &str) -> Result<SearchOutcome, ValidationError> {
        let city = match validate_city(raw_input) {
            Ok(city) => city,
            Err(e) => {
                tracing::debug!("Rejected search input {:?}: {}", raw_input, e);
                self.view.show_error(e.user_message());
                return Err(e);
            }
        };

        self.view.clear_input();
        Ok(self.fetch_weather_for(city).await)
    }

    /// Fetch current conditions and forecast for `city` and show the result.
    ///
    /// The request is sequenced when this is called, not when the returned
    /// future is first polled, so searches are ordered by when they were issued.
    pub fn fetch_weather_for<'a>(
        &'a self,
        city: &'a str,
    ) -> impl Future<Output = SearchOutcome> + 'a {
        let ticket = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("Searching weather for '{}' (request {})", city, ticket);

        self.view.show_loading();
        self.view.set_search_control(SearchControl::Searching);

        async move {
            let (current, forecast) =
                tokio::join!(self.provider.current(city), self.provider.forecast(city));

            if !self.is_latest(ticket) {
                tracing::info!("Discarding stale result for '{}' (request {})", city, ticket);
                return SearchOutcome::Superseded;
            }

            let outcome = match (current, forecast) {
                (Ok(current), Ok(forecast)) => {
                    let days = select_forecast_days(&forecast);
                    self.view.render_current(&current);
                    self.view.render_forecast(&days);

                    let Some(entries) = self.commit_search(city, ticket) else {
                        tracing::info!(
                            "Request {} for '{}' superseded before saving",
                            ticket,
                            city
                        );
                        return SearchOutcome::Superseded;
                    };
                    self.show_recent_searches(&entries);

                    tracing::info!("Showing weather for '{}' ({} forecast days)", city, days.len());
                    SearchOutcome::Success(WeatherReport {
                        city: city.to_string(),
                        current,
                        days,
                    })
                }
                (Err(e), _) => self.fail(city, FetchTarget::Current, e),
                (_, Err(e)) => self.fail(city, FetchTarget::Forecast, e),
            };

            self.view.set_search_control(SearchControl::Idle);
            outcome
        }
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == ticket
    }

    /// Record `city` and save it as the last viewed city, unless a newer
    /// request has started. Both writes happen under the history lock.
    fn commit_search(&self, city: &str, ticket: u64) -> Option<Vec<String>> {
        let mut history = self.history.lock();
        if !self.is_latest(ticket) {
            return None;
        }

        self.record_locked(&mut history, city);
        if let Err(e) = self.session.save_last_city(city) {
            tracing::warn!("Failed to save last city: {}", e);
        }
        Some(history.entries().to_vec())
    }

    fn fail(&self, city: &str, target: FetchTarget, cause: WeatherError) -> SearchOutcome {
        let not_found = cause.is_not_found();
        let err = FetchError::new(city, target, cause.to_string());
        if not_found {
            tracing::warn!("{}", err);
        } else {
            tracing::error!("{}", err);
        }
        self.view.show_error(err.user_message());
        SearchOutcome::Failed(err)
    }

    /// Put `city` at the front of the recent searches and persist the list.
    ///
    /// Returns the normalized name that was stored.
    pub fn record_successful_search(&self, city: &str) -> String {
        let (name, entries) = {
            let mut history = self.history.lock();
            let name = self.record_locked(&mut history, city);
            (name, history.entries().to_vec())
        };

        self.show_recent_searches(&entries);
        name
    }

    fn record_locked(&self, history: &mut SearchHistory, city: &str) -> String {
        let name = history.record(city);
        if let Err(e) = self.session.save_history(history) {
            tracing::warn!("Failed to save recent searches: {}", e);
        }
        name
    }

    /// Startup: show the recent searches, then replay the last viewed city
    /// or show the welcome placeholder.
    pub async fn restore_last_session(&self) -> Option<SearchOutcome> {
        self.refresh_recent_searches();

        match self.session.load_last_city() {
            Some(city) => {
                tracing::info!("Restoring last viewed city '{}'", city);
                Some(self.fetch_weather_for(&city).await)
            }
            None => {
                self.view.show_welcome();
                None
            }
        }
    }

    /// Empty the recent searches if the user confirms. Returns whether it did.
    pub fn clear_history(&self) -> bool {
        if !self.view.confirm(CLEAR_HISTORY_PROMPT) {
            tracing::debug!("Clearing recent searches declined");
            return false;
        }

        {
            let mut history = self.history.lock();
            history.clear();
            if let Err(e) = self.session.clear_history() {
                tracing::warn!("Failed to remove saved recent searches: {}", e);
            }
        }

        tracing::info!("Cleared recent searches");
        self.show_recent_searches(&[]);
        true
    }

    /// Replay the recent search at `index` (0 = most recent).
    ///
    /// Returns `None` when there is no such entry.
    pub async fn search_recent(&self, index: usize) -> Option<SearchOutcome> {
        let city = self.history.lock().get(index).map(str::to_string)?;
        self.view.set_input(&city);
        Some(self.fetch_weather_for(&city).await)
    }

    /// Recent searches, most recent first
    pub fn recent_searches(&self) -> Vec<String> {
        self.history.lock().entries().to_vec()
    }

    /// Redraw the recent-searches panel from the current list.
    pub fn refresh_recent_searches(&self) {
        let entries = self.recent_searches();
        self.show_recent_searches(&entries);
    }

    fn show_recent_searches(&self, entries: &[String]) {
        self.view.render_recent_searches(entries);
        self.view.set_recent_searches_visible(!entries.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_city_trims() {
        assert_eq!(validate_city("  Paris \n"), Ok("Paris"));
    }

    #[test]
    fn test_validate_city_empty() {
        assert_eq!(validate_city(""), Err(ValidationError::Empty));
        assert_eq!(validate_city("   \t"), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_city_too_short() {
        assert_eq!(
            validate_city(" x "),
            Err(ValidationError::TooShort { min: MIN_CITY_LENGTH })
        );
        assert_eq!(validate_city("Ås"), Ok("Ås"));
    }
}
