//! Durable key-value storage for session state.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use skycast_core::StorageError;
use std::collections::HashMap;
use std::path::Path;

/// String-keyed storage that survives restarts.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the store at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Open(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StorageError::Open(format!("{}: {}", path.display(), e)))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        tracing::debug!("Opened state store at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Open(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                "#,
            )
            .map_err(query_error)
    }
}

fn query_error(e: rusqlite::Error) -> StorageError {
    StorageError::Query(e.to_string())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn
            .lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(query_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(query_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .lock()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(query_error)?;
        Ok(())
    }
}

/// Process-local store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
