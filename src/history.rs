use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The rolling history keeps this many entries; older ones are evicted.
pub const HISTORY_CAPACITY: usize = 5;

/// The single fixed key under which the serialized log lives in the store.
pub const HISTORY_KEY: &str = "analysis_history";

/// Summary of one completed analysis, as kept in the rolling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub file_name: String,
    pub total_sum: f64,
    pub count: usize,
    pub date: DateTime<Utc>,
}

/// Minimal durable key-value contract the recorder needs from its storage
/// collaborator. SQLite backs it here; any store with get/set-by-key
/// semantics slots in.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Bounded most-recent-first log of past analyses on top of a key-value
/// store. Storage trouble is never fatal: unreadable history loads as
/// empty, and a failed write leaves the in-memory log intact.
pub struct HistoryRecorder<S: KvStore> {
    store: S,
}

impl<S: KvStore> HistoryRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted log. Absent or corrupt data comes back as an
    /// empty log, not as an error.
    pub fn load(&self) -> Vec<AnalysisRecord> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(
                    action = "load",
                    component = "history",
                    error = %e,
                    "History read failed; continuing with an empty log"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    action = "load",
                    component = "history",
                    error = %e,
                    "Persisted history is corrupt; continuing with an empty log"
                );
                Vec::new()
            }
        }
    }

    /// Insert a record at the front, evict past the capacity, persist, and
    /// hand back the updated log. A failed write is logged and swallowed so
    /// the analysis result still displays.
    pub fn record(&mut self, record: AnalysisRecord) -> Vec<AnalysisRecord> {
        let mut log = self.load();
        log.insert(0, record);
        log.truncate(HISTORY_CAPACITY);

        match serde_json::to_string(&log) {
            Ok(serialized) => {
                if let Err(e) = self.store.set(HISTORY_KEY, &serialized) {
                    warn!(
                        action = "persist",
                        component = "history",
                        error = %e,
                        "History write failed; keeping the in-memory log"
                    );
                }
            }
            Err(e) => {
                warn!(
                    action = "persist",
                    component = "history",
                    error = %e,
                    "History serialization failed; keeping the in-memory log"
                );
            }
        }

        log
    }
}
