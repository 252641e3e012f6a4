pub mod history;
pub mod session;
pub mod store;

pub use history::{normalize_city_name, SearchHistory, MAX_RECENT_SEARCHES};
pub use session::{SessionStore, LAST_CITY_KEY, RECENT_SEARCHES_KEY};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
