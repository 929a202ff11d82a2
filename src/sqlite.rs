use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::history::KvStore;

/// SQLite-backed key-value store: one `kv` table, get and set by key.
/// This is the durable store the history survives process restarts in.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open store at {:?}", path))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .context("failed to initialize store schema")?;

        info!(action = "open", component = "store", path = ?path, "Key-value store ready");
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("failed to read key {:?} from store", key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .with_context(|| format!("failed to write key {:?} to store", key))?;
        Ok(())
    }
}

/// In-memory store for tests and for runs that opt out of durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{AnalysisRecord, HistoryRecorder};
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn get_and_set_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::open(&dir.path().join("kv.db")).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("greeting", "hello").unwrap();
        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn set_overwrites_the_previous_value() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::open(&dir.path().join("kv.db")).unwrap();

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn values_survive_a_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("kv.db");

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.set("k", "persisted").unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn history_survives_a_restart() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("kv.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            let mut recorder = HistoryRecorder::new(store);
            recorder.record(AnalysisRecord {
                file_name: "before-restart.txt".to_string(),
                total_sum: 42.0,
                count: 7,
                date: Utc::now(),
            });
        }

        let recorder = HistoryRecorder::new(SqliteStore::open(&db_path).unwrap());
        let log = recorder.load();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].file_name, "before-restart.txt");
        assert_eq!(log[0].count, 7);
    }
}
