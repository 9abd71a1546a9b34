//! SQLite-backed storage for the native client
//!
//! One `kv` table stands in for the browser's local storage, so a CLI session
//! survives between invocations.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use super::{SessionError, Storage};

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the storage file, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::Storage(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Storage that lives only as long as the value
    pub fn in_memory() -> Result<Self, SessionError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SessionError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!("Session storage ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, SessionError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SessionError::Storage(format!("storage lock poisoned: {}", e)))?;
        Ok(f(&conn)?)
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.with_conn(|conn| conn.execute("DELETE FROM kv WHERE key = ?1", params![key]).map(|_| ()))
    }
}

impl From<rusqlite::Error> for SessionError {
    fn from(err: rusqlite::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_storage_roundtrip() {
        let storage = SqliteStorage::in_memory().unwrap();

        assert_eq!(storage.get_item("user").unwrap(), None);
        storage.set_item("user", "{\"id\":1}").unwrap();
        storage.set_item("user", "{\"id\":2}").unwrap();
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("{\"id\":2}"));

        storage.remove_item("user").unwrap();
        assert_eq!(storage.get_item("user").unwrap(), None);
    }

    #[test]
    fn test_sqlite_storage_persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set_item("userId", "42").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("userId").unwrap().as_deref(), Some("42"));
    }
}
