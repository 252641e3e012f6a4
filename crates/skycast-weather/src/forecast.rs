//! Daily forecast selection.

use crate::types::{DailySample, ForecastSeries};

/// Label fragment of the sample that represents a day
pub const MIDDAY_MARKER: &str = "12:00:00";

/// Maximum number of days shown
pub const FORECAST_DAYS: usize = 5;

/// Pick the midday sample of each day, in series order, at most [`FORECAST_DAYS`].
///
/// A series with fewer midday samples yields fewer days.
pub fn select_forecast_days(forecast: &ForecastSeries) -> Vec<DailySample> {
    forecast
        .samples
        .iter()
        .filter(|sample| sample.label.contains(MIDDAY_MARKER))
        .take(FORECAST_DAYS)
        .map(DailySample::from)
        .collect()
}
