//! Core domain logic for the org-chart editor.
//! This crate is the single source of truth for tree invariants.

pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod tree;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId, EmployeePatch, EmployeeValidationError};
pub use persist::{ChartStore, JsonFileStore, MemoryStore, StoreError, StoreResult};
pub use service::chart_service::{default_tree, ChartService, Command, CommandError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
