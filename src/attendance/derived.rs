//! Derived attendance fields.
//!
//! `worked_hours` and `late` are pure functions of the record's times, the
//! resolved schedule and the overnight guard. They are recomputed
//! explicitly after every mutation; nothing here touches storage.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::config::OvernightGuard;
use crate::models::{AttendanceRecord, EffectiveSchedule};

/// Hours between entry and exit on `date`.
///
/// An exit at or before the entry is taken to be on the following day, so
/// overnight shifts work whether or not the schedule flags them.
///
/// # Example
///
/// ```
/// use attendance_engine::attendance::worked_hours;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let entry = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
/// let exit = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
/// assert_eq!(worked_hours(date, entry, exit), 8.0);
/// ```
pub fn worked_hours(date: NaiveDate, entry: NaiveTime, exit: NaiveTime) -> f64 {
    let start = date.and_time(entry);
    let mut end = date.and_time(exit);
    if exit <= entry {
        end += TimeDelta::days(1);
    }
    (end - start).num_seconds() as f64 / 3600.0
}

/// Whether an entry at `actual` on `date` is late against `schedule`.
///
/// No schedule means the entry cannot be late. The overnight guard is
/// checked before the tolerance comparison and short-circuits it.
pub fn is_late(
    date: NaiveDate,
    actual: NaiveTime,
    schedule: Option<&EffectiveSchedule>,
    guard: &OvernightGuard,
) -> bool {
    let Some(schedule) = schedule else {
        return false;
    };

    if guard.excuses(schedule.overnight, schedule.entry_time, actual) {
        return false;
    }

    let expected = date.and_time(schedule.entry_time);
    let actual = date.and_time(actual);
    actual > expected + TimeDelta::minutes(i64::from(schedule.tolerance_minutes))
}

/// Recomputes `worked_hours` and `late` in place.
///
/// Idempotent: calling it twice with the same inputs leaves the record
/// unchanged.
pub fn recompute_derived(
    record: &mut AttendanceRecord,
    schedule: Option<&EffectiveSchedule>,
    guard: &OvernightGuard,
) {
    record.worked_hours = match (record.entry_time, record.exit_time) {
        (Some(entry), Some(exit)) => worked_hours(record.date, entry, exit),
        _ => 0.0,
    };
    record.late = match record.entry_time {
        Some(entry) => is_late(record.date, entry, schedule, guard),
        None => false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, ScheduleSource};
    use proptest::prelude::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn schedule(entry: &str, tolerance: u32, overnight: bool) -> EffectiveSchedule {
        EffectiveSchedule {
            entry_time: make_time(entry),
            tolerance_minutes: tolerance,
            overnight,
            shift_code: None,
            source: ScheduleSource::WeeklyTemplate,
        }
    }

    // ==========================================================================
    // Worked hours
    // ==========================================================================

    #[test]
    fn test_day_shift_worked_hours() {
        let hours = worked_hours(make_date("2026-01-15"), make_time("08:00"), make_time("16:30"));
        assert_eq!(hours, 8.5);
    }

    #[test]
    fn test_overnight_worked_hours() {
        let hours = worked_hours(make_date("2026-01-15"), make_time("23:00"), make_time("07:00"));
        assert_eq!(hours, 8.0);
    }

    #[test]
    fn test_equal_times_count_as_full_day() {
        let hours = worked_hours(make_date("2026-01-15"), make_time("08:00"), make_time("08:00"));
        assert_eq!(hours, 24.0);
    }

    #[test]
    fn test_worked_hours_is_not_rounded() {
        let hours = worked_hours(make_date("2026-01-15"), make_time("08:00"), make_time("08:20"));
        assert!((hours - 1.0 / 3.0).abs() < 1e-12);
    }

    // ==========================================================================
    // Lateness
    // ==========================================================================

    #[test]
    fn test_late_beyond_tolerance() {
        let s = schedule("08:00", 10, false);
        let guard = OvernightGuard::default();
        let date = make_date("2026-01-15");
        assert!(is_late(date, make_time("08:15"), Some(&s), &guard));
        assert!(!is_late(date, make_time("08:09"), Some(&s), &guard));
        // Exactly at the tolerance boundary is on time.
        assert!(!is_late(date, make_time("08:10"), Some(&s), &guard));
        assert!(is_late(date, make_time("08:11"), Some(&s), &guard));
    }

    #[test]
    fn test_no_schedule_is_never_late() {
        let guard = OvernightGuard::default();
        assert!(!is_late(make_date("2026-01-15"), make_time("23:59"), None, &guard));
    }

    #[test]
    fn test_overnight_guard_excuses_morning_entry() {
        let s = schedule("23:00", 10, true);
        let guard = OvernightGuard::default();
        assert!(!is_late(make_date("2026-01-15"), make_time("06:30"), Some(&s), &guard));
    }

    #[test]
    fn test_overnight_guard_disabled_compares_normally() {
        let s = schedule("23:00", 10, true);
        let guard = OvernightGuard {
            enabled: false,
            ..OvernightGuard::default()
        };
        // 06:30 is before 23:10 on the same date.
        assert!(!is_late(make_date("2026-01-15"), make_time("06:30"), Some(&s), &guard));
        assert!(is_late(make_date("2026-01-15"), make_time("23:30"), Some(&s), &guard));
    }

    #[test]
    fn test_overnight_guard_needs_overnight_flag() {
        // Same hours without the flag: afternoon entry counts as late.
        let s = schedule("19:00", 10, false);
        let guard = OvernightGuard::default();
        assert!(is_late(make_date("2026-01-15"), make_time("19:30"), Some(&s), &guard));
        assert!(!is_late(make_date("2026-01-15"), make_time("06:30"), Some(&s), &guard));
    }

    #[test]
    fn test_overnight_late_arrival_in_evening() {
        let s = schedule("23:00", 10, true);
        let guard = OvernightGuard::default();
        assert!(is_late(make_date("2026-01-15"), make_time("23:45"), Some(&s), &guard));
        // After noon the guard no longer applies.
        assert!(!is_late(make_date("2026-01-15"), make_time("13:00"), Some(&s), &guard));
    }

    // ==========================================================================
    // Recompute
    // ==========================================================================

    #[test]
    fn test_recompute_is_idempotent() {
        let mut record = AttendanceRecord::new(EmployeeId(1), make_date("2026-01-15"));
        record.entry_time = Some(make_time("08:15"));
        record.exit_time = Some(make_time("16:00"));
        let s = schedule("08:00", 10, false);
        let guard = OvernightGuard::default();

        recompute_derived(&mut record, Some(&s), &guard);
        let once = record.clone();
        recompute_derived(&mut record, Some(&s), &guard);

        assert_eq!(record, once);
        assert!(record.late);
        assert_eq!(record.worked_hours, 7.75);
    }

    #[test]
    fn test_recompute_without_entry_clears_fields() {
        let mut record = AttendanceRecord::new(EmployeeId(1), make_date("2026-01-15"));
        record.worked_hours = 5.0;
        record.late = true;
        recompute_derived(&mut record, None, &OvernightGuard::default());
        assert_eq!(record.worked_hours, 0.0);
        assert!(!record.late);
    }

    proptest! {
        #[test]
        fn prop_worked_hours_in_range(entry in 0u32..86400, exit in 0u32..86400) {
            let entry = NaiveTime::from_num_seconds_from_midnight_opt(entry, 0).unwrap();
            let exit = NaiveTime::from_num_seconds_from_midnight_opt(exit, 0).unwrap();
            let hours = worked_hours(make_date("2026-01-15"), entry, exit);
            prop_assert!(hours > 0.0 && hours <= 24.0);
        }
    }
}
