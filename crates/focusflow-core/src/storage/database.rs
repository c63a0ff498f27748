//! SQLite-based local storage.
//!
//! Provides persistent storage for:
//! - A string key-value store holding the task list and goal slots
//! - Completed timer phases and their statistics
//!
//! Decode failures on load are treated as "no data" by the stores;
//! nothing in this module panics on corrupt values.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::DatabaseError;
use crate::timer::Phase;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub phase: String,
    pub label: String,
    pub duration_secs: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_work_secs: u64,
    pub total_break_secs: u64,
    pub today_sessions: u64,
    pub today_work_secs: u64,
}

/// SQLite database at `~/.config/focusflow/focusflow.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database in the application data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::DataDir(e.to_string()))?
            .join("focusflow.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path (used by tests).
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        // Concurrent CLI invocations share this file; wait out writers.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self { conn };
        db.migrate()?;
        debug!(?path, "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                phase         TEXT NOT NULL,
                label         TEXT NOT NULL DEFAULT '',
                duration_secs INTEGER NOT NULL,
                started_at    TEXT NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Session log ──────────────────────────────────────────────────

    /// Record a completed phase to the session log.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        phase: Phase,
        label: &str,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        let phase_str = match phase {
            Phase::Work => "work",
            Phase::Break => "break",
        };
        self.conn.execute(
            "INSERT INTO sessions (phase, label, duration_secs, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                phase_str,
                label,
                duration_secs,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn stats_today(&self) -> Result<Stats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT phase, COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             WHERE completed_at >= ?1
             GROUP BY phase",
        )?;

        let mut stats = Stats::default();
        let rows = stmt.query_map(params![format!("{today}T00:00:00+00:00")], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        for row in rows {
            let (phase, count, secs) = row?;
            stats.total_sessions += count;
            match phase.as_str() {
                "work" => {
                    stats.total_work_secs += secs;
                    stats.today_sessions += count;
                    stats.today_work_secs += secs;
                }
                "break" => {
                    stats.total_break_secs += secs;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    pub fn stats_all(&self) -> Result<Stats, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT phase, COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             GROUP BY phase",
        )?;

        let mut stats = Stats::default();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        for row in rows {
            let (phase, count, secs) = row?;
            stats.total_sessions += count;
            match phase.as_str() {
                "work" => stats.total_work_secs += secs,
                "break" => stats.total_break_secs += secs,
                _ => {}
            }
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stmt2 = self.conn.prepare(
            "SELECT COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             WHERE phase = 'work' AND completed_at >= ?1",
        )?;
        let (today_sessions, today_work_secs) = stmt2.query_row(
            params![format!("{today}T00:00:00+00:00")],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.today_sessions = today_sessions;
        stats.today_work_secs = today_work_secs;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn kv_overwrite() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "a").unwrap();
        db.kv_set("k", "b").unwrap();
        assert_eq!(db.kv_get("k").unwrap().unwrap(), "b");
    }

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(Phase::Work, "Work", 25 * 60, now, now)
            .unwrap();
        db.record_session(Phase::Break, "Break", 5 * 60, now, now)
            .unwrap();
        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_work_secs, 25 * 60);
        assert_eq!(stats.total_break_secs, 5 * 60);
    }
}
