//! File-backed chart store.
//!
//! # Responsibility
//! - Persist the chart as one pretty-printed JSON file.
//! - Map a missing file to the "no prior save" signal.
//!
//! # Invariants
//! - One named file is the whole slot; every save rewrites it fully.

use super::{ChartStore, StoreError, StoreResult};
use crate::model::employee::Employee;
use log::{error, info};
use std::path::{Path, PathBuf};

/// Chart store writing one JSON document to a named file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over `path`. The file is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartStore for JsonFileStore {
    fn save(&self, root: &Employee) -> StoreResult<()> {
        let encoded = serde_json::to_string_pretty(root).map_err(StoreError::Serialize)?;
        match std::fs::write(&self.path, encoded) {
            Ok(()) => {
                info!(
                    "event=chart_save module=persist status=ok path={} nodes={}",
                    self.path.display(),
                    root.node_count()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=chart_save module=persist status=error path={} error={}",
                    self.path.display(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn load(&self) -> StoreResult<Option<Employee>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "event=chart_load module=persist status=not_found path={}",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=chart_load module=persist status=error path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(err.into());
            }
        };

        match serde_json::from_str::<Employee>(&raw) {
            Ok(root) => {
                info!(
                    "event=chart_load module=persist status=ok path={} nodes={}",
                    self.path.display(),
                    root.node_count()
                );
                Ok(Some(root))
            }
            Err(err) => {
                error!(
                    "event=chart_load module=persist status=error path={} error_code=corrupt error={}",
                    self.path.display(),
                    err
                );
                Err(StoreError::Corrupt(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileStore;
    use crate::model::employee::Employee;
    use crate::persist::{ChartStore, StoreError};

    #[test]
    fn round_trips_a_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("org-chart.json"));

        let mut root = Employee::with_id("1", "John Doe", Some("CEO".to_string()));
        root.children.push(Employee::with_id("2", "Jane", None));
        store.save(&root).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, root);
    }

    #[test]
    fn missing_file_is_not_found_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn malformed_file_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("org-chart.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }
}
