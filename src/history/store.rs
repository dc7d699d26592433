//! SQLite-backed search history.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;

use crate::observability::metrics;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_loc TEXT,
    to_loc TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)";

/// One logged search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryRecord {
    pub id: i64,
    pub from_location: String,
    pub to_location: String,
    /// SQLite `CURRENT_TIMESTAMP` text (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("History connection lock poisoned")]
    Poisoned,
}

/// Append-only log of resolved searches.
///
/// The connection lives behind a mutex and is only used from the blocking
/// pool, so async tasks never wait on disk I/O. Clones share the connection
/// and the set of pending background writes.
#[derive(Clone)]
pub struct SearchHistory {
    conn: Arc<Mutex<Connection>>,
    pending: Arc<Mutex<JoinSet<()>>>,
}

impl SearchHistory {
    /// Open (or create) the database file and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let conn = Connection::open(path.as_ref())?;
        Self::init(conn)
    }

    /// Private in-memory database, gone when the last clone drops.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, HistoryError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            pending: Arc::new(Mutex::new(JoinSet::new())),
        })
    }

    /// Append a record and return its id.
    pub async fn insert(&self, from_location: &str, to_location: &str) -> Result<i64, HistoryError> {
        let from_location = from_location.to_owned();
        let to_location = to_location.to_owned();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO search_history (from_loc, to_loc) VALUES (?1, ?2)",
                params![from_location, to_location],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Append a record in the background.
    ///
    /// Failures are logged and dropped. Call [`flush`](Self::flush) before
    /// exiting to let pending writes land.
    pub fn record(&self, from_location: String, to_location: String) {
        let store = self.clone();
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            match store.insert(&from_location, &to_location).await {
                Ok(id) => {
                    metrics::record_history_write(true);
                    tracing::debug!(id, from = %from_location, to = %to_location, "Search logged");
                }
                Err(e) => {
                    metrics::record_history_write(false);
                    tracing::warn!(error = %e, from = %from_location, to = %to_location, "Failed to log search");
                }
            }
        });
    }

    /// Wait for every background write started so far.
    pub async fn flush(&self) {
        let mut pending = {
            let mut guard = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "History write task failed");
            }
        }
    }

    /// Number of logged searches.
    pub async fn count(&self) -> Result<u64, HistoryError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM search_history", [], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
        })
        .await
    }

    /// Most recent searches, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryRecord>, HistoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, from_loc, to_loc, timestamp FROM search_history ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(SearchHistoryRecord {
                    id: row.get(0)?,
                    from_location: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    to_location: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    timestamp: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })?;
            let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, HistoryError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| HistoryError::Poisoned)?;
            f(&guard).map_err(HistoryError::from)
        })
        .await?
    }
}
