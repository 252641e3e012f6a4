//! Persisted session state: recent searches and the last viewed city.

use skycast_core::StorageError;
use std::sync::Arc;

use crate::history::SearchHistory;
use crate::store::KeyValueStore;

pub const RECENT_SEARCHES_KEY: &str = "recent_searches";
pub const LAST_CITY_KEY: &str = "last_city";

/// Reads and writes session state through a [`KeyValueStore`].
///
/// Reads never fail: a missing or unreadable record is an empty initial state.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_history(&self) -> SearchHistory {
        let raw = match self.store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SearchHistory::new(),
            Err(e) => {
                tracing::warn!("Could not read recent searches, starting empty: {}", e);
                return SearchHistory::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => SearchHistory::from_entries(entries),
            Err(e) => {
                let err = StorageError::Corrupt {
                    key: RECENT_SEARCHES_KEY.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!("{}; starting with empty history", err);
                SearchHistory::new()
            }
        }
    }

    pub fn save_history(&self, history: &SearchHistory) -> Result<(), StorageError> {
        let json = serde_json::to_string(history.entries())?;
        self.store.set(RECENT_SEARCHES_KEY, &json)
    }

    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.store.remove(RECENT_SEARCHES_KEY)
    }

    /// The last successfully viewed city; blank values count as absent.
    pub fn load_last_city(&self) -> Option<String> {
        match self.store.get(LAST_CITY_KEY) {
            Ok(value) => value
                .map(|city| city.trim().to_string())
                .filter(|city| !city.is_empty()),
            Err(e) => {
                tracing::warn!("Could not read last city: {}", e);
                None
            }
        }
    }

    pub fn save_last_city(&self, city: &str) -> Result<(), StorageError> {
        self.store.set(LAST_CITY_KEY, city)
    }
}
