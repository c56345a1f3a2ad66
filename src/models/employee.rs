//! Employee model.
//!
//! The engine consumes employee records read-only; everything beyond the
//! identity, owning organization, and active flag belongs to the surrounding
//! HR record management.

use serde::{Deserialize, Serialize};

/// An employee as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// The organization the employee belongs to.
    pub organization_id: i64,
    /// Display name, used in error messages and slips.
    pub name: String,
    /// Whether the employee is currently active.
    pub is_active: bool,
}

impl Employee {
    /// Creates an active employee.
    pub fn new(id: i64, organization_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            organization_id,
            name: name.into(),
            is_active: true,
        }
    }
}
