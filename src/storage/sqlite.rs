//! SQLite key-value backend.
//!
//! All namespaces live in one `kv_store` table keyed by (namespace, key).
//! Uses parameterized queries only. `clear()` deletes every row of the
//! store's namespace.

use super::KeyValueStore;
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Persistent store backed by a SQLite database
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    namespace: String,
}

/// Creates the `kv_store` table if it does not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv_store (
            namespace   TEXT NOT NULL,
            key         TEXT NOT NULL,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (namespace, key)
        );",
    )
}

impl SqliteStore {
    /// Open (or create) the database file and use the given namespace
    pub fn open(path: &Path, namespace: &str) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        log::info!("Opening trainer database: {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn, namespace)
    }

    /// Fresh in-memory database, mostly for tests
    pub fn open_in_memory(namespace: &str) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, namespace)
    }

    fn from_connection(conn: Connection, namespace: &str) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            namespace: namespace.to_string(),
        })
    }

    /// Another store on the same database with a different namespace
    pub fn namespace(&self, namespace: &str) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace_name(&self) -> &str {
        &self.namespace
    }

    /// Number of keys in this namespace
    pub fn len(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM kv_store WHERE namespace = ?1",
            params![self.namespace],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute(
            "INSERT INTO kv_store (namespace, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace, key) DO UPDATE SET
                value      = excluded.value,
                updated_at = datetime('now')",
            params![self.namespace, key, value],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = conn.execute(
            "DELETE FROM kv_store WHERE namespace = ?1",
            params![self.namespace],
        )?;
        log::info!("Cleared {} entries from '{}'", removed, self.namespace);
        Ok(())
    }
}
