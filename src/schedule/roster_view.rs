//! Read-only roster views built on the resolver.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::{Employee, EmployeeId, ScheduleAnswer};

use super::ScheduleResolver;

/// Who works what on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterDayView {
    /// The date.
    pub date: NaiveDate,
    /// Its weekday.
    pub weekday: Weekday,
    /// Employees grouped by shift label: the shift code, or the expected
    /// entry time (`HH:MM`) for weekly entries without a linked shift.
    pub shifts: BTreeMap<String, Vec<EmployeeId>>,
    /// Employees on an explicit rest day.
    pub rest_day: Vec<EmployeeId>,
}

/// Resolves every employee for each date in `[start, end]`.
///
/// Employees with no schedule on a date are omitted from that day's view;
/// see [`unscheduled_on`] for them.
pub fn weekly_roster(
    resolver: &ScheduleResolver,
    employees: &[Employee],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<RosterDayView> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let mut view = RosterDayView {
                date,
                weekday: date.weekday(),
                shifts: BTreeMap::new(),
                rest_day: Vec::new(),
            };
            for employee in employees {
                match resolver.resolve_answer(employee.id, date) {
                    Some(ScheduleAnswer::Scheduled(schedule)) => {
                        let label = schedule
                            .shift_code
                            .unwrap_or_else(|| schedule.entry_time.format("%H:%M").to_string());
                        view.shifts.entry(label).or_default().push(employee.id);
                    }
                    Some(ScheduleAnswer::DayOff) => view.rest_day.push(employee.id),
                    None => {}
                }
            }
            view
        })
        .collect()
}

/// Employees with neither a schedule nor an explicit rest day on `date`.
pub fn unscheduled_on(
    resolver: &ScheduleResolver,
    employees: &[Employee],
    date: NaiveDate,
) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| resolver.resolve_answer(e.id, date).is_none())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyOverride, RecurringWeeklyEntry, ShiftDefinition, WeekdayMask};
    use crate::store::{AssignmentBook, NewAssignment, Roster, ShiftCatalog, WeeklyTemplate};
    use chrono::NaiveTime;
    use std::sync::Arc;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn setup() -> (ScheduleResolver, Vec<Employee>) {
        let catalog = Arc::new(ShiftCatalog::new());
        catalog.seed(ShiftDefinition::standard_set()).unwrap();
        let roster = Arc::new(Roster::new());
        let template = Arc::new(WeeklyTemplate::new());
        let book = Arc::new(AssignmentBook::new(Arc::clone(&catalog)));

        // 1: shift A on weekdays; 2: weekly Thursday at 09:30; 3: nothing.
        book.create(NewAssignment {
            employee: EmployeeId(1),
            shift_code: "A".to_string(),
            start_date: make_date("2026-01-01"),
            end_date: None,
            weekdays: WeekdayMask::MON_FRI,
            note: String::new(),
        })
        .unwrap();
        template.upsert(
            RecurringWeeklyEntry::new(EmployeeId(2), Weekday::Thu, make_time("09:30"), make_time("17:30"), 10)
                .unwrap(),
        );
        roster.upsert(DailyOverride::rest_day(EmployeeId(1), make_date("2026-01-16")));

        let resolver = ScheduleResolver::standard(catalog, roster, template, book, 10);
        let employees = vec![
            Employee::new(EmployeeId(1), "E1", "Ana", "Plant"),
            Employee::new(EmployeeId(2), "E2", "Luis", "Plant"),
            Employee::new(EmployeeId(3), "E3", "Marta", "Plant"),
        ];
        (resolver, employees)
    }

    #[test]
    fn test_weekly_roster_groups_by_label() {
        let (resolver, employees) = setup();
        let days = weekly_roster(&resolver, &employees, make_date("2026-01-15"), make_date("2026-01-17"));

        assert_eq!(days.len(), 3);
        let thursday = &days[0];
        assert_eq!(thursday.weekday, Weekday::Thu);
        assert_eq!(thursday.shifts.get("A"), Some(&vec![EmployeeId(1)]));
        assert_eq!(thursday.shifts.get("09:30"), Some(&vec![EmployeeId(2)]));

        let friday = &days[1];
        assert_eq!(friday.rest_day, vec![EmployeeId(1)]);
        assert!(friday.shifts.is_empty());

        // Saturday: nobody.
        assert!(days[2].shifts.is_empty() && days[2].rest_day.is_empty());
    }

    #[test]
    fn test_unscheduled_excludes_rest_days() {
        let (resolver, employees) = setup();
        let thursday: Vec<EmployeeId> = unscheduled_on(&resolver, &employees, make_date("2026-01-15"))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(thursday, vec![EmployeeId(3)]);

        // Friday: 1 is on a rest day, 2 has no Friday entry.
        let friday: Vec<EmployeeId> = unscheduled_on(&resolver, &employees, make_date("2026-01-16"))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(friday, vec![EmployeeId(2), EmployeeId(3)]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let (resolver, employees) = setup();
        assert!(weekly_roster(&resolver, &employees, make_date("2026-01-17"), make_date("2026-01-15")).is_empty());
    }
}
