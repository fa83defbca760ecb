//! Alert store
//!
//! Append-only SQLite table of disaster alerts. The store owns its
//! connection; callers pass the handle explicitly and release it with
//! [`AlertStore::close`] (or by dropping it).

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::errors::{MonitorError, Result};
use crate::types::{AlertRecord, NewAlert};

/// Handle to the alerts table
pub struct AlertStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl AlertStore {
    /// Open (or create) a file-backed store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.initialize()?;
        tracing::debug!(path = %path.display(), "alert store opened");
        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        schema::create_tables(&self.conn)
    }

    /// Backing file, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one alert and return the stored row
    pub fn append(&self, alert: &NewAlert) -> Result<AlertRecord> {
        self.conn.execute(
            "INSERT INTO alerts (disaster_type, location, timestamp) VALUES (?1, ?2, ?3)",
            params![alert.disaster_type, alert.location, alert.timestamp],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, location = %alert.location, timestamp = %alert.timestamp, "alert appended");
        Ok(alert.clone().with_id(id))
    }

    /// Every stored alert, in insertion order
    pub fn all(&self) -> Result<Vec<AlertRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, disaster_type, location, timestamp FROM alerts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(AlertRecord {
                id: row.get(0)?,
                disaster_type: row.get(1)?,
                location: row.get(2)?,
                timestamp: row.get(3)?,
            })
        })?;

        let mut alerts = Vec::new();
        for row in rows {
            alerts.push(row?);
        }
        Ok(alerts)
    }

    /// Number of stored alerts
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM alerts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Release the connection, surfacing any close error
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| MonitorError::StoreError(e))?;
        tracing::debug!("alert store closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn alert(location: &str) -> NewAlert {
        NewAlert::new("Generic Disaster", location, "2024-05-01 12:00:00")
    }

    #[test]
    fn test_empty_store() {
        let store = AlertStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let store = AlertStore::open_in_memory().unwrap();
        let first = store.append(&alert("Mumbai")).unwrap();
        let second = store.append(&alert("Delhi")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("alerts.db");

        let store = AlertStore::open(&path).unwrap();
        store.append(&alert("Kolkata")).unwrap();
        store.close().unwrap();

        let reopened = AlertStore::open(&path).unwrap();
        let alerts = reopened.all().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].location, "Kolkata");
        assert_eq!(reopened.path(), Some(path.as_path()));
    }
}
