//! Persistence contracts and store implementations.
//!
//! # Responsibility
//! - Define the single-slot save/load contract for the chart.
//! - Isolate serialization and I/O details from the service layer.
//!
//! # Invariants
//! - Exactly one persisted chart at a time; last write wins.
//! - "No prior save" is `Ok(None)`, distinct from corrupt data.
//! - Stores never mutate the tree they are given.

use crate::model::employee::Employee;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Result type used by chart store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from chart store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying read/write failure.
    Io(std::io::Error),
    /// The tree could not be serialized.
    Serialize(serde_json::Error),
    /// A prior save exists but cannot be decoded.
    Corrupt(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "chart store I/O error: {err}"),
            Self::Serialize(err) => write!(f, "chart could not be serialized: {err}"),
            Self::Corrupt(err) => write!(f, "persisted chart is corrupt: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Single-slot persistence contract for one org chart.
///
/// Implementations must treat `save` as whole-tree replacement: the
/// service always passes the full current root, never a diff.
pub trait ChartStore {
    /// Replaces the stored chart with `root`.
    fn save(&self, root: &Employee) -> StoreResult<()>;
    /// Loads the stored chart, or `Ok(None)` when no save exists yet.
    ///
    /// # Errors
    /// - `StoreError::Corrupt` when a prior save cannot be decoded.
    fn load(&self) -> StoreResult<Option<Employee>>;
}
