//! Attendance record model and clock event kinds.
//!
//! This module defines the [`AttendanceRecord`] kept per (employee, date)
//! and the state it moves through as clock events arrive.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The direction of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventKind {
    /// Clock-in.
    Entry,
    /// Clock-out.
    Exit,
}

impl std::fmt::Display for ClockEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockEventKind::Entry => write!(f, "entry"),
            ClockEventKind::Exit => write!(f, "exit"),
        }
    }
}

/// Lifecycle of a record: `NoEntry -> HasEntry -> Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Neither time is set.
    NoEntry,
    /// Entry set, exit pending.
    HasEntry,
    /// Both times set.
    Complete,
}

/// One employee's attendance for one calendar date.
///
/// `worked_hours` and `late` are derived; they are only written by the
/// attendance computer's recompute step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee.
    pub employee: EmployeeId,
    /// The calendar date the record belongs to (the shift's start day).
    pub date: NaiveDate,
    /// Clock-in time.
    pub entry_time: Option<NaiveTime>,
    /// Clock-out time; may be earlier than entry for overnight shifts.
    pub exit_time: Option<NaiveTime>,
    /// Hours between entry and exit, unrounded.
    pub worked_hours: f64,
    /// Whether the entry was late against the resolved schedule.
    pub late: bool,
    /// Lateness excused by an administrator.
    #[serde(default)]
    pub justified: bool,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

impl AttendanceRecord {
    /// A blank record for the given key.
    pub fn new(employee: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee,
            date,
            entry_time: None,
            exit_time: None,
            worked_hours: 0.0,
            late: false,
            justified: false,
            note: String::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RecordState {
        match (self.entry_time, self.exit_time) {
            (Some(_), Some(_)) => RecordState::Complete,
            (Some(_), None) => RecordState::HasEntry,
            _ => RecordState::NoEntry,
        }
    }

    /// True when the record has an entry but no exit yet.
    pub fn is_open(&self) -> bool {
        self.state() == RecordState::HasEntry
    }

    /// Worked time as `"{hours}h {minutes}m"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, EmployeeId};
    /// use chrono::NaiveDate;
    ///
    /// let mut record = AttendanceRecord::new(EmployeeId(1), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    /// record.worked_hours = 7.75;
    /// assert_eq!(record.worked_time_label(), "7h 45m");
    /// ```
    pub fn worked_time_label(&self) -> String {
        let total_minutes = (self.worked_hours * 60.0).round() as i64;
        format!("{}h {}m", total_minutes / 60, total_minutes % 60)
    }
}
