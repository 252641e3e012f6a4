//! Terminal rendering of the weather views.

use colored::Colorize;
use parking_lot::Mutex;
use std::io::{BufRead, Write};

use skycast_core::Units;
use skycast_weather::{DailySample, WeatherSnapshot};

use crate::view::{SearchControl, WeatherView};

/// Rounded temperature with its unit symbol, e.g. `"15°C"`
pub fn format_temperature(value: f64, units: Units) -> String {
    format!("{}{}", value.round() as i64, units.temperature_symbol())
}

/// Recent searches as numbered entries, e.g. `"[1] London  [2] Paris"`
pub fn format_recent_searches(cities: &[String]) -> String {
    cities
        .iter()
        .enumerate()
        .map(|(i, city)| format!("[{}] {}", i + 1, city))
        .collect::<Vec<_>>()
        .join("  ")
}

/// One forecast line: weekday, temperature, description and icon URL
pub fn format_forecast_day(day: &DailySample, units: Units) -> String {
    format!(
        "  {:<4}{:>6}  {}  {}",
        day.weekday,
        format_temperature(day.temperature, units),
        day.description,
        day.icon_url()
    )
}

/// Parse a yes/no answer; anything but an explicit yes is a no.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Writes views to stdout and reads confirmations from stdin.
pub struct TerminalView {
    units: Units,
    assume_yes: bool,
    control: Mutex<SearchControl>,
    recent_visible: Mutex<bool>,
}

impl TerminalView {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            assume_yes: false,
            control: Mutex::new(SearchControl::Idle),
            recent_visible: Mutex::new(false),
        }
    }

    /// Answer every confirmation with yes instead of prompting.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn search_control(&self) -> SearchControl {
        *self.control.lock()
    }

    pub fn recent_searches_visible(&self) -> bool {
        *self.recent_visible.lock()
    }
}

impl WeatherView for TerminalView {
    fn show_loading(&self) {
        println!("{}", "Loading weather data...".bright_black());
    }

    fn show_error(&self, message: &str) {
        println!("{} {}", "Oops!".red().bold(), message.red());
    }

    fn show_welcome(&self) {
        println!("{}", "Welcome!".bright_cyan().bold());
        println!("Search for a city to get started.");
        println!("{}", "Try: London, Paris, Tokyo".bright_black());
    }

    fn render_current(&self, snapshot: &WeatherSnapshot) {
        println!();
        println!("{}", snapshot.name.bold());
        let mut line = format!("  {}", format_temperature(snapshot.temperature, self.units));
        if let Some(feels_like) = snapshot.feels_like {
            line.push_str(&format!(
                " (feels like {})",
                format_temperature(feels_like, self.units)
            ));
        }
        println!("{}", line.bright_yellow());
        println!("  {}", snapshot.description);

        let mut details = Vec::new();
        if let Some(humidity) = snapshot.humidity {
            details.push(format!("humidity {}%", humidity));
        }
        if let Some(wind) = snapshot.wind_speed {
            details.push(format!("wind {:.1} {}", wind, self.units.speed_symbol()));
        }
        if !details.is_empty() {
            println!("  {}", details.join("  ").bright_black());
        }
        println!("  {}", snapshot.icon_url().bright_black());
    }

    fn render_forecast(&self, days: &[DailySample]) {
        println!();
        println!("{}", "5-Day Forecast".bold());
        for day in days {
            println!("{}", format_forecast_day(day, self.units));
        }
    }

    fn render_recent_searches(&self, cities: &[String]) {
        if cities.is_empty() {
            return;
        }
        println!();
        println!(
            "{} {}",
            "Recent searches:".bright_magenta(),
            format_recent_searches(cities)
        );
        println!("{}", "Type #N to search again.".bright_black());
    }

    fn set_recent_searches_visible(&self, visible: bool) {
        *self.recent_visible.lock() = visible;
    }

    fn set_search_control(&self, state: SearchControl) {
        tracing::trace!("Search control: {}", state.label());
        *self.control.lock() = state;
    }

    fn clear_input(&self) {}

    fn set_input(&self, text: &str) {
        println!("{}", format!("> {}", text).green());
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt.bright_yellow());
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_confirmation(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}
