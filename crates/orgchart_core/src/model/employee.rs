//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical node record of the org tree.
//! - Provide constructors and the single validation rule the chart has.
//!
//! # Invariants
//! - `id` is stable, unique across the tree, and never reassigned.
//! - `children` order is append order and is meaningful for rendering.
//! - Serialization omits `title` when absent and `children` when empty,
//!   so the on-disk shape stays byte-compatible across chart revisions.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one employee node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are caller-supplied strings; generated ids use UUIDv4 text.
pub type EmployeeId = String;

/// Validation errors for employee records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// `name` is blank after trimming.
    EmptyName,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name must not be blank"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// One node of the org tree: a person plus their direct reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable id used for lookup, selection and command targeting.
    pub id: EmployeeId,
    /// Display name. Non-empty after validation.
    pub name: String,
    /// Optional job title shown below the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Direct reports in render order. Absent in JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Employee>,
}

impl Employee {
    /// Creates a leaf employee with a generated stable id.
    pub fn new(name: impl Into<String>, title: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, title)
    }

    /// Creates a leaf employee with a caller-provided stable id.
    ///
    /// Used where identity already exists externally, e.g. the UI's
    /// timestamp-derived ids or a restored chart.
    ///
    /// # Invariants
    /// - The provided `id` must remain unique within its tree.
    pub fn with_id(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title,
            children: Vec::new(),
        }
    }

    /// Checks the single required-field rule.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to the empty string.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        Ok(())
    }

    /// Counts nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Employee::node_count)
            .sum::<usize>()
    }
}

/// Field-level edit payload for one employee.
///
/// `None` fields are left untouched on apply, so a partial edit never
/// erases data it did not mention. Supplied text is trimmed before
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    /// Target node id.
    pub id: EmployeeId,
    /// Replacement display name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement job title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EmployeePatch {
    /// Creates an empty patch targeting `id`.
    pub fn for_id(id: impl Into<EmployeeId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            title: None,
        }
    }

    /// Sets the replacement name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Checks the supplied fields against the required-field rule.
    ///
    /// # Errors
    /// - `EmptyName` when a supplied `name` trims to the empty string.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(EmployeeValidationError::EmptyName);
            }
        }
        Ok(())
    }
}
