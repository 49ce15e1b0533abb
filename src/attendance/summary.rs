//! Aggregates for attendance reports.

use serde::Serialize;

use crate::models::{AttendanceRecord, RecordState};

/// Totals over a set of attendance records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceSummary {
    /// Number of records considered.
    pub records: usize,
    /// Records with an entry.
    pub days_worked: usize,
    /// Late entries that were not justified.
    pub late_count: usize,
    /// Late entries excused by an administrator.
    pub justified_count: usize,
    /// Sum of worked hours.
    pub total_hours: f64,
    /// Records with both entry and exit.
    pub complete_records: usize,
}

impl AttendanceSummary {
    /// Summarizes `records`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::attendance::AttendanceSummary;
    ///
    /// let summary = AttendanceSummary::from_records(&[]);
    /// assert_eq!(summary.records, 0);
    /// assert_eq!(summary.total_hours, 0.0);
    /// ```
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.records += 1;
            if record.entry_time.is_some() {
                summary.days_worked += 1;
            }
            if record.late {
                if record.justified {
                    summary.justified_count += 1;
                } else {
                    summary.late_count += 1;
                }
            }
            if record.state() == RecordState::Complete {
                summary.complete_records += 1;
            }
            summary.total_hours += record.worked_hours;
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use chrono::{NaiveDate, NaiveTime};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let mut complete = AttendanceRecord::new(EmployeeId(1), make_date("2026-01-15"));
        complete.entry_time = Some(make_time("08:15"));
        complete.exit_time = Some(make_time("16:00"));
        complete.worked_hours = 7.75;
        complete.late = true;

        let mut excused = AttendanceRecord::new(EmployeeId(1), make_date("2026-01-16"));
        excused.entry_time = Some(make_time("08:30"));
        excused.late = true;
        excused.justified = true;

        let blank = AttendanceRecord::new(EmployeeId(1), make_date("2026-01-17"));

        let summary = AttendanceSummary::from_records(&[complete, excused, blank]);
        assert_eq!(
            summary,
            AttendanceSummary {
                records: 3,
                days_worked: 2,
                late_count: 1,
                justified_count: 1,
                total_hours: 7.75,
                complete_records: 1,
            }
        );
    }
}
