use skycast_weather::{DailySample, WeatherSnapshot};

/// State of the search trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchControl {
    #[default]
    Idle,
    Searching,
}

impl SearchControl {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Search",
            Self::Searching => "Searching...",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Presentation surface driven by the controller.
///
/// Implementations own all mutation of what the user sees; the controller
/// only hands over structured data.
pub trait WeatherView: Send + Sync {
    fn show_loading(&self);

    fn show_error(&self, message: &str);

    /// Placeholder shown when there is nothing to display yet
    fn show_welcome(&self);

    fn render_current(&self, snapshot: &WeatherSnapshot);

    fn render_forecast(&self, days: &[DailySample]);

    /// Replace the recent-search entries, most recent first
    fn render_recent_searches(&self, cities: &[String]);

    fn set_recent_searches_visible(&self, visible: bool);

    fn set_search_control(&self, state: SearchControl);

    fn clear_input(&self);

    fn set_input(&self, text: &str);

    /// Ask the user a yes/no question
    fn confirm(&self, prompt: &str) -> bool;
}
