//! Recent searches: a bounded, deduplicated, most-recent-first list.

/// Maximum number of remembered searches
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Display form of a city name: first character upper-cased, the rest lower-cased.
///
/// Uses Unicode case mapping without any locale rules.
pub fn normalize_city_name(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(city.len());
            name.extend(first.to_uppercase());
            name.push_str(&chars.as_str().to_lowercase());
            name
        }
        None => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping repeats and anything past the limit.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for entry in entries {
            if history.entries.len() == MAX_RECENT_SEARCHES {
                break;
            }
            let entry = entry.into();
            if !entry.trim().is_empty() && !history.entries.contains(&entry) {
                history.entries.push(entry);
            }
        }
        history
    }

    /// Move `city` (normalized) to the front, evicting the oldest entry past the limit.
    ///
    /// Returns the normalized name.
    pub fn record(&mut self, city: &str) -> String {
        let name = normalize_city_name(city);

        self.entries.retain(|existing| existing != &name);
        self.entries.insert(0, name.clone());
        self.entries.truncate(MAX_RECENT_SEARCHES);

        name
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
