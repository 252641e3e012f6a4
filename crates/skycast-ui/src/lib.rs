//! Search orchestration and presentation for SkyCast.
//!
//! [`SearchController`] owns the search flow and the recent-searches list;
//! everything visible goes through a [`WeatherView`].

pub mod controller;
pub mod terminal;
pub mod view;

pub use controller::{
    validate_city, SearchController, SearchOutcome, WeatherReport, CLEAR_HISTORY_PROMPT,
    MIN_CITY_LENGTH,
};
pub use terminal::TerminalView;
pub use view::{SearchControl, WeatherView};
