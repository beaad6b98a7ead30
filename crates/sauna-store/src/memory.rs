//! In-memory store implementation

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{EntryKey, Store, StoreError, StoreResult};

/// Map-backed store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<EntryKey, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (simulates a full or read-only disk)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Store for MemoryStore {
    fn read_entry(&self, key: EntryKey) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))?;
        Ok(entries.get(&key).cloned())
    }

    fn write_entry(&self, key: EntryKey, json: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other(format!(
                "write to {} rejected",
                key
            ))));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))?;
        entries.insert(key, json.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        !self.fail_writes.load(Ordering::SeqCst)
    }
}
