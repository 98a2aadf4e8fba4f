//! In-memory chart store.
//!
//! # Responsibility
//! - Provide the file store's contract without touching the disk.
//!
//! The slot holds serialized JSON text rather than a tree value, so the
//! full encode/decode path is exercised exactly as with the file store.

use super::{ChartStore, StoreError, StoreResult};
use crate::model::employee::Employee;
use std::sync::Mutex;

/// Chart store keeping one serialized document in memory.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw serialized slot contents, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock_slot().clone()
    }

    /// Overwrites the raw slot contents, bypassing serialization.
    ///
    /// Test hook for staging corrupt or pre-existing data.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.lock_slot() = Some(raw.into());
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ChartStore for MemoryStore {
    fn save(&self, root: &Employee) -> StoreResult<()> {
        let encoded = serde_json::to_string_pretty(root).map_err(StoreError::Serialize)?;
        *self.lock_slot() = Some(encoded);
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<Employee>> {
        let Some(raw) = self.lock_slot().clone() else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(StoreError::Corrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::employee::Employee;
    use crate::persist::{ChartStore, StoreError};

    #[test]
    fn empty_slot_is_not_found() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_restores_the_tree() {
        let store = MemoryStore::new();
        let root = Employee::with_id("1", "John Doe", Some("CEO".to_string()));
        store.save(&root).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), root);
    }

    #[test]
    fn staged_garbage_reports_corruption() {
        let store = MemoryStore::new();
        store.set_raw("][");
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }
}
