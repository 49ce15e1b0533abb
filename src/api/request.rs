//! Request types for the attendance API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints in [`super::handlers`].

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DailyOverride, EmployeeId, RosterDay, WeekdayMask};
use crate::store::{BulkAssignment, NewAssignment};

/// Body of `POST /attendance/entry` and `POST /attendance/exit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEventRequest {
    /// The employee clocking in or out.
    pub employee_id: EmployeeId,
    /// RFC 3339 instant of the event; the server's clock when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// Query of `GET /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// Limit to one employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Last date (inclusive).
    pub end: NaiveDate,
}

/// Body of `POST /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Shift code to assign.
    pub shift_code: String,
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive); open-ended when omitted.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekday names; Monday–Friday when omitted.
    #[serde(default)]
    pub weekdays: WeekdayMask,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

impl From<AssignmentRequest> for NewAssignment {
    fn from(req: AssignmentRequest) -> Self {
        NewAssignment {
            employee: req.employee_id,
            shift_code: req.shift_code,
            start_date: req.start_date,
            end_date: req.end_date,
            weekdays: req.weekdays,
            note: req.note,
        }
    }
}

/// Body of `POST /assignments/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentRequest {
    /// Employees to assign.
    pub employee_ids: Vec<EmployeeId>,
    /// Shift code to assign.
    pub shift_code: String,
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive); open-ended when omitted.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekday names; Monday–Friday when omitted.
    #[serde(default)]
    pub weekdays: WeekdayMask,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

impl BulkAssignmentRequest {
    /// Splits the request into the employee list and the shared assignment.
    pub fn into_parts(self) -> (Vec<EmployeeId>, BulkAssignment) {
        (
            self.employee_ids,
            BulkAssignment {
                shift_code: self.shift_code,
                start_date: self.start_date,
                end_date: self.end_date,
                weekdays: self.weekdays,
                note: self.note,
            },
        )
    }
}

/// Body of `PUT /overrides`.
///
/// Exactly one of `shift_code` and `rest_day: true` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRequest {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date overridden.
    pub date: NaiveDate,
    /// Shift to work that day.
    #[serde(default)]
    pub shift_code: Option<String>,
    /// Marks the day off.
    #[serde(default)]
    pub rest_day: bool,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Who is entering the override.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl OverrideRequest {
    /// Builds the override, or explains why the request is ambiguous.
    pub fn into_override(self) -> Result<DailyOverride, String> {
        let day = match (self.shift_code, self.rest_day) {
            (Some(shift_code), false) => RosterDay::Shift { shift_code },
            (None, true) => RosterDay::RestDay,
            (Some(_), true) => return Err("a rest day cannot carry a shift_code".to_string()),
            (None, false) => return Err("either shift_code or rest_day is required".to_string()),
        };
        Ok(DailyOverride {
            employee: self.employee_id,
            date: self.date,
            day,
            note: self.note,
            created_by: self.created_by,
        })
    }
}

/// Query of `GET /roster`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterQuery {
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Last date (inclusive).
    pub end: NaiveDate,
    /// Limit to one department.
    #[serde(default)]
    pub department: Option<String>,
}

/// Query of `GET /roster/unscheduled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledQuery {
    /// The date to check.
    pub date: NaiveDate,
    /// Limit to one department.
    #[serde(default)]
    pub department: Option<String>,
}
