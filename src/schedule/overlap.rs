//! Overlap and conflict validation for date-range assignments.
//!
//! Two active assignments for the same employee conflict when their date
//! intervals intersect (an open end is unbounded) **and** their weekday
//! masks share a day. Sharing only one of the two is fine: a Mon–Fri and a
//! Sat–Sun assignment over the same month coexist.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::DateRangeAssignment;

/// Validates `candidate` against the employee's other assignments.
///
/// Checks run in order and the first failure is returned:
/// 1. the weekday mask is not empty,
/// 2. the end date, if any, is not before the start date,
/// 3. no other active assignment of the same employee overlaps in both
///    dates and weekdays.
///
/// `existing` may contain the candidate itself (on update) and assignments
/// of other employees or inactive ones; those are skipped. An inactive
/// candidate only gets the first two checks.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AssignmentId, DateRangeAssignment, EmployeeId, WeekdayMask};
/// use attendance_engine::schedule::validate_assignment;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// let weekdays = DateRangeAssignment {
///     id: AssignmentId(1),
///     employee: EmployeeId(1),
///     shift_code: "A".to_string(),
///     start_date: day(1),
///     end_date: Some(day(10)),
///     weekdays: WeekdayMask::MON_FRI,
///     note: String::new(),
///     active: true,
/// };
/// let weekend = DateRangeAssignment {
///     id: AssignmentId(2),
///     start_date: day(5),
///     end_date: Some(day(20)),
///     weekdays: WeekdayMask::WEEKEND,
///     ..weekdays.clone()
/// };
/// assert!(validate_assignment(&weekend, [&weekdays]).is_ok());
/// ```
pub fn validate_assignment<'a, I>(candidate: &DateRangeAssignment, existing: I) -> EngineResult<()>
where
    I: IntoIterator<Item = &'a DateRangeAssignment>,
{
    if candidate.weekdays.is_empty() {
        return Err(EngineError::InvalidAssignmentRange {
            message: "at least one weekday must be selected".to_string(),
        });
    }

    if let Some(end) = candidate.end_date {
        if end < candidate.start_date {
            return Err(EngineError::InvalidAssignmentRange {
                message: format!(
                    "end date {} is before start date {}",
                    end, candidate.start_date
                ),
            });
        }
    }

    if !candidate.active {
        return Ok(());
    }

    if let Some(other) = existing
        .into_iter()
        .find(|other| conflicts_with(candidate, other))
    {
        warn!(
            employee = %candidate.employee,
            conflicting_id = %other.id,
            candidate = %candidate.describe(),
            existing = %other.describe(),
            "Assignment rejected by overlap validator"
        );
        return Err(EngineError::ConflictingAssignment {
            employee: candidate.employee,
            conflicting_id: other.id,
            conflicting_range: other.describe(),
        });
    }

    Ok(())
}

/// True if `other` is a distinct active assignment of the same employee
/// that overlaps `candidate` in both dates and weekdays.
pub fn conflicts_with(candidate: &DateRangeAssignment, other: &DateRangeAssignment) -> bool {
    other.id != candidate.id
        && other.employee == candidate.employee
        && other.active
        && candidate.active
        && candidate.dates_intersect(other)
        && candidate.weekdays.intersects(other.weekdays)
}
