//! Recurring weekly template entries.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{EmployeeId, ShiftDefinition};
use crate::error::{EngineError, EngineResult};

/// Fixed entry/exit times for one employee on one weekday.
///
/// The oldest of the three schedule sources; it still answers ahead of
/// date-range assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringWeeklyEntry {
    /// The employee.
    pub employee: EmployeeId,
    /// The weekday this entry applies on.
    pub weekday: Weekday,
    /// Scheduled entry time.
    pub entry_time: NaiveTime,
    /// Scheduled exit time.
    pub exit_time: NaiveTime,
    /// Grace minutes after entry.
    pub tolerance_minutes: u32,
    /// Optional linked catalog shift; its overnight flag wins over the times.
    #[serde(default)]
    pub shift_code: Option<String>,
    /// Inactive entries are ignored by resolution.
    pub active: bool,
}

impl RecurringWeeklyEntry {
    /// Creates an active entry, rejecting a zero-length span.
    pub fn new(
        employee: EmployeeId,
        weekday: Weekday,
        entry_time: NaiveTime,
        exit_time: NaiveTime,
        tolerance_minutes: u32,
    ) -> EngineResult<Self> {
        if exit_time == entry_time {
            return Err(EngineError::InvalidShiftDefinition {
                code: format!("weekly:{}:{}", employee, weekday),
                message: "exit time must differ from entry time".to_string(),
            });
        }
        Ok(Self {
            employee,
            weekday,
            entry_time,
            exit_time,
            tolerance_minutes,
            shift_code: None,
            active: true,
        })
    }

    /// Creates an entry that copies a catalog shift's times and tolerance.
    pub fn from_shift(employee: EmployeeId, weekday: Weekday, shift: &ShiftDefinition) -> Self {
        Self {
            employee,
            weekday,
            entry_time: shift.entry_time,
            exit_time: shift.exit_time,
            tolerance_minutes: shift.tolerance_minutes,
            shift_code: Some(shift.code.clone()),
            active: true,
        }
    }

    /// Overnight-ness inferred from the times alone.
    pub fn crosses_midnight(&self) -> bool {
        self.exit_time < self.entry_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_new_rejects_zero_length() {
        let result = RecurringWeeklyEntry::new(
            EmployeeId(1),
            Weekday::Mon,
            make_time("08:00"),
            make_time("08:00"),
            10,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidShiftDefinition { .. })
        ));
    }

    #[test]
    fn test_crosses_midnight() {
        let night = RecurringWeeklyEntry::new(
            EmployeeId(1),
            Weekday::Fri,
            make_time("22:00"),
            make_time("06:00"),
            5,
        )
        .unwrap();
        assert!(night.crosses_midnight());
        assert!(night.active);
    }

    #[test]
    fn test_from_shift_copies_times_and_tolerance() {
        let shift = ShiftDefinition::new("B", "Evening", make_time("15:00"), make_time("23:00"), false)
            .unwrap()
            .with_tolerance(15);
        let entry = RecurringWeeklyEntry::from_shift(EmployeeId(2), Weekday::Tue, &shift);
        assert_eq!(entry.entry_time, make_time("15:00"));
        assert_eq!(entry.tolerance_minutes, 15);
        assert_eq!(entry.shift_code.as_deref(), Some("B"));
    }
}
