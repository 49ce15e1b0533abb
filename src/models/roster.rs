//! Day-level roster overrides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// What an override says about its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterDay {
    /// Work the given catalog shift.
    Shift {
        /// The shift code.
        shift_code: String,
    },
    /// Explicit day off; carries no shift.
    RestDay,
}

impl RosterDay {
    /// True for an explicit rest day.
    pub fn is_rest_day(&self) -> bool {
        matches!(self, RosterDay::RestDay)
    }
}

/// An administrator-entered assignment for one employee on one exact date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOverride {
    /// The employee.
    pub employee: EmployeeId,
    /// The exact date overridden.
    pub date: NaiveDate,
    /// Shift or rest day.
    pub day: RosterDay,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Who entered the override, if known.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl DailyOverride {
    /// Override that puts the employee on `shift_code` for `date`.
    pub fn shift(employee: EmployeeId, date: NaiveDate, shift_code: impl Into<String>) -> Self {
        Self {
            employee,
            date,
            day: RosterDay::Shift {
                shift_code: shift_code.into(),
            },
            note: String::new(),
            created_by: None,
        }
    }

    /// Override that gives the employee `date` off.
    pub fn rest_day(employee: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee,
            date,
            day: RosterDay::RestDay,
            note: String::new(),
            created_by: None,
        }
    }
}
