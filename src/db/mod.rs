mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;

use crate::models::*;

/// Key holding the id of the spread picked on the home screen.
pub const SELECTED_SPREAD_KEY: &str = "selectedSpread";
/// Key holding the serialized current reading.
pub const CURRENT_READING_KEY: &str = "currentReading";
/// Key holding the serialized reading history.
pub const HISTORY_KEY: &str = "taroHistory";

/// Durable key-value store backed by SQLite.
///
/// Values are JSON blobs without schema versioning. Readers tolerate absent
/// or malformed values by falling back to defaults.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Raw key-value operations
    // ============================================================

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        read_value(&conn, key)
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        write_value(&conn, key, value)
    }

    pub fn delete_value(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    /// Reads a JSON value, treating a malformed blob as absent.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring malformed value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    // ============================================================
    // Selected spread
    // ============================================================

    pub fn get_selected_spread(&self) -> Result<SpreadId> {
        let spread = self
            .get_value(SELECTED_SPREAD_KEY)?
            .and_then(|s| SpreadId::from_str(&s))
            .unwrap_or_default();
        Ok(spread)
    }

    pub fn set_selected_spread(&self, spread: SpreadId) -> Result<()> {
        self.set_value(SELECTED_SPREAD_KEY, spread.as_str())
    }

    // ============================================================
    // Current reading
    // ============================================================

    pub fn get_current_reading(&self) -> Result<Option<Reading>> {
        self.get_json(CURRENT_READING_KEY)
    }

    pub fn set_current_reading(&self, reading: &Reading) -> Result<()> {
        let json = serde_json::to_string(reading)?;
        self.set_value(CURRENT_READING_KEY, &json)
    }

    /// Stores a freshly completed reading as current and adds it to history.
    pub fn record_reading(&self, reading: &Reading) -> Result<History> {
        self.set_current_reading(reading)?;
        self.add_to_history(reading.clone())
    }

    // ============================================================
    // History
    // ============================================================

    pub fn get_history(&self) -> Result<History> {
        let conn = self.conn.lock().expect("database lock poisoned");
        read_history(&conn)
    }

    /// Pushes a reading onto the stored history.
    ///
    /// The read and the write happen under one lock, so a concurrent clear
    /// or add cannot be overwritten with a stale list.
    pub fn add_to_history(&self, reading: Reading) -> Result<History> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut history = read_history(&conn)?;
        history.push(reading);
        write_value(&conn, HISTORY_KEY, &serde_json::to_string(&history)?)?;
        Ok(history)
    }

    pub fn clear_history(&self) -> Result<()> {
        let json = serde_json::to_string(&History::new())?;
        self.set_value(HISTORY_KEY, &json)
    }
}

fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
        .optional()?;
    Ok(value)
}

fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        (key, value, Utc::now().to_rfc3339()),
    )?;
    Ok(())
}

/// Reads the stored history entry by entry. Entries that do not parse are
/// skipped with a warning; the rest are kept.
fn read_history(conn: &Connection) -> Result<History> {
    let Some(raw) = read_value(conn, HISTORY_KEY)? else {
        return Ok(History::new());
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Ignoring malformed value under '{}': {}", HISTORY_KEY, e);
            return Ok(History::new());
        }
    };

    let readings = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<Reading>(entry) {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!("Skipping malformed history entry {}: {}", i, e);
                None
            }
        })
        .collect::<Vec<_>>();
    Ok(History::from(readings))
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// `<data dir>/taro/taro.db`
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "taro")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("taro.db"))
}

/// Opens and migrates the database at `path`, or the default location.
pub fn open_and_migrate(path: Option<&Path>) -> Result<Database> {
    let db = match path {
        Some(path) => Database::open(path.to_path_buf())?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}
