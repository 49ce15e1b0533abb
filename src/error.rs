//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the schedule and attendance core can report.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::{AssignmentId, EmployeeId};

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ShiftNotFound {
///     code: "Z".to_string(),
/// };
/// assert_eq!(error.to_string(), "Shift not found: Z");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A shift definition had an impossible time span.
    #[error("Invalid shift definition '{code}': {message}")]
    InvalidShiftDefinition {
        /// The shift code.
        code: String,
        /// A description of what made the definition invalid.
        message: String,
    },

    /// No shift with the given code exists in the catalog.
    #[error("Shift not found: {code}")]
    ShiftNotFound {
        /// The shift code that was not found.
        code: String,
    },

    /// The shift exists but has been deactivated.
    #[error("Shift '{code}' is inactive")]
    InactiveShift {
        /// The inactive shift code.
        code: String,
    },

    /// A date-range assignment had an empty weekday mask or an end before its start.
    #[error("Invalid assignment range: {message}")]
    InvalidAssignmentRange {
        /// A description of the range problem.
        message: String,
    },

    /// The overlap validator found an active assignment that collides with the candidate.
    #[error(
        "Conflicting assignment for employee {employee}: overlaps assignment {conflicting_id} ({conflicting_range})"
    )]
    ConflictingAssignment {
        /// The employee both assignments belong to.
        employee: EmployeeId,
        /// The id of the existing assignment.
        conflicting_id: AssignmentId,
        /// Human-readable description of the existing assignment.
        conflicting_range: String,
    },

    /// No assignment with the given id exists.
    #[error("Assignment not found: {id}")]
    AssignmentNotFound {
        /// The missing assignment id.
        id: AssignmentId,
    },

    /// No employee with the given id exists in the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The missing employee id.
        id: EmployeeId,
    },

    /// An entry was submitted for a record that already has one.
    #[error("Employee {employee} already clocked in on {date} at {existing}")]
    DuplicateEntry {
        /// The employee.
        employee: EmployeeId,
        /// The attendance record date.
        date: NaiveDate,
        /// The entry time already on the record.
        existing: NaiveTime,
    },

    /// An exit was submitted for a record that already has one.
    #[error("Employee {employee} already clocked out on {date} at {existing}")]
    DuplicateExit {
        /// The employee.
        employee: EmployeeId,
        /// The attendance record date.
        date: NaiveDate,
        /// The exit time already on the record.
        existing: NaiveTime,
    },

    /// An exit was submitted with no entry to close.
    #[error("Employee {employee} has no entry on {date} to clock out from")]
    MissingEntry {
        /// The employee.
        employee: EmployeeId,
        /// The attendance record date.
        date: NaiveDate,
    },

    /// No schedule source answered for the employee and date.
    #[error("No active schedule for employee {employee} on {date}")]
    NoActiveSchedule {
        /// The employee.
        employee: EmployeeId,
        /// The date that was resolved.
        date: NaiveDate,
    },

    /// The attendance store already holds a record for this key.
    #[error("Attendance record for employee {employee} on {date} already exists")]
    RecordConflict {
        /// The employee.
        employee: EmployeeId,
        /// The record date.
        date: NaiveDate,
    },

    /// No attendance record exists for this key.
    #[error("Attendance record for employee {employee} on {date} not found")]
    RecordNotFound {
        /// The employee.
        employee: EmployeeId,
        /// The record date.
        date: NaiveDate,
    },
}

impl EngineError {
    /// Returns true for the errors a clock event can be rejected with.
    pub fn is_clock_event_rejection(&self) -> bool {
        matches!(
            self,
            EngineError::DuplicateEntry { .. }
                | EngineError::DuplicateExit { .. }
                | EngineError::MissingEntry { .. }
                | EngineError::RecordConflict { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
