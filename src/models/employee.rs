//! Employee identity and directory entry.
//!
//! This module defines the [`EmployeeId`] key used by every schedule source
//! and attendance record, and the minimal [`Employee`] entry used by roster views.

use serde::{Deserialize, Serialize};

/// Identifier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents an employee known to the attendance system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The badge / payroll code (e.g., "EMP-0042").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// Inactive employees are skipped by roster views and bulk assignment.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Creates an active employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, EmployeeId};
    ///
    /// let employee = Employee::new(EmployeeId(1), "EMP-0001", "Ana Ruiz", "Plant");
    /// assert!(employee.active);
    /// assert!(employee.in_department("plant"));
    /// ```
    pub fn new(
        id: EmployeeId,
        code: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            department: department.into(),
            active: true,
        }
    }

    /// Case-insensitive department match.
    pub fn in_department(&self, department: &str) -> bool {
        self.department.eq_ignore_ascii_case(department)
    }
}
