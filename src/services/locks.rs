use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::types::CategoryId;

/// Per-category mutual exclusion for operations that replace or remove a
/// record together with its files.
///
/// Operations on different ids never wait on each other. An id's entry lives
/// only while some caller holds or waits for it.
#[derive(Debug, Default)]
pub struct CategoryLocks {
    entries: Mutex<HashMap<CategoryId, Arc<Mutex<()>>>>,
}

impl CategoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `id`.
    pub fn with_lock<T>(&self, id: CategoryId, f: impl FnOnce() -> T) -> T {
        let entry = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(id).or_default())
        };

        let result = {
            let _guard = entry.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the table and this call still reference the entry: nobody is waiting.
        if Arc::strong_count(&entry) == 2 {
            entries.remove(&id);
        }
        result
    }

    /// Number of ids currently locked or waited on.
    pub fn active(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
