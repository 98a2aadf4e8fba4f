//! Domain model for the org chart.
//!
//! # Responsibility
//! - Define the canonical employee record rendered by the chart.
//! - Keep the serialized shape identical to the persisted JSON format.
//!
//! # Invariants
//! - Every node is identified by a stable `EmployeeId`.
//! - An absent `children` field and an empty one are equivalent.

pub mod employee;
