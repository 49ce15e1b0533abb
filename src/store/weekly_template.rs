//! Recurring weekly template table.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Weekday;

use crate::models::{EmployeeId, RecurringWeeklyEntry};

use super::{read, write};

/// One entry per (employee, weekday); an upsert replaces the previous one,
/// so there is never more than one active entry for a key.
#[derive(Debug, Default)]
pub struct WeeklyTemplate {
    entries: RwLock<HashMap<(EmployeeId, Weekday), RecurringWeeklyEntry>>,
}

impl WeeklyTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for its (employee, weekday).
    pub fn upsert(&self, entry: RecurringWeeklyEntry) -> Option<RecurringWeeklyEntry> {
        write(&self.entries).insert((entry.employee, entry.weekday), entry)
    }

    /// The entry for the key, active or not.
    pub fn get(&self, employee: EmployeeId, weekday: Weekday) -> Option<RecurringWeeklyEntry> {
        read(&self.entries).get(&(employee, weekday)).cloned()
    }

    /// The entry for the key if it is active.
    pub fn active_entry(
        &self,
        employee: EmployeeId,
        weekday: Weekday,
    ) -> Option<RecurringWeeklyEntry> {
        self.get(employee, weekday).filter(|e| e.active)
    }

    /// Deactivates the entry; returns false if there was none.
    pub fn deactivate(&self, employee: EmployeeId, weekday: Weekday) -> bool {
        match write(&self.entries).get_mut(&(employee, weekday)) {
            Some(entry) => {
                entry.active = false;
                true
            }
            None => false,
        }
    }

    /// Removes the entry outright.
    pub fn remove(&self, employee: EmployeeId, weekday: Weekday) -> Option<RecurringWeeklyEntry> {
        write(&self.entries).remove(&(employee, weekday))
    }

    /// All of an employee's entries, Monday first.
    pub fn entries_for(&self, employee: EmployeeId) -> Vec<RecurringWeeklyEntry> {
        let mut entries: Vec<RecurringWeeklyEntry> = read(&self.entries)
            .values()
            .filter(|e| e.employee == employee)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.weekday.num_days_from_monday());
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn entry(weekday: Weekday, entry: &str, exit: &str) -> RecurringWeeklyEntry {
        RecurringWeeklyEntry::new(EmployeeId(1), weekday, make_time(entry), make_time(exit), 10)
            .unwrap()
    }

    #[test]
    fn test_upsert_replaces_same_key() {
        let template = WeeklyTemplate::new();
        assert!(template.upsert(entry(Weekday::Mon, "08:00", "16:00")).is_none());
        let previous = template.upsert(entry(Weekday::Mon, "09:00", "17:00"));

        assert_eq!(previous.unwrap().entry_time, make_time("08:00"));
        assert_eq!(
            template.get(EmployeeId(1), Weekday::Mon).unwrap().entry_time,
            make_time("09:00")
        );
    }

    #[test]
    fn test_inactive_entry_hidden_from_active_lookup() {
        let template = WeeklyTemplate::new();
        template.upsert(entry(Weekday::Tue, "08:00", "16:00"));
        assert!(template.deactivate(EmployeeId(1), Weekday::Tue));

        assert!(template.active_entry(EmployeeId(1), Weekday::Tue).is_none());
        assert!(template.get(EmployeeId(1), Weekday::Tue).is_some());
        assert!(!template.deactivate(EmployeeId(1), Weekday::Wed));
    }

    #[test]
    fn test_entries_for_sorted_by_weekday() {
        let template = WeeklyTemplate::new();
        template.upsert(entry(Weekday::Fri, "08:00", "16:00"));
        template.upsert(entry(Weekday::Mon, "08:00", "16:00"));
        template.upsert(entry(Weekday::Wed, "08:00", "16:00"));

        let days: Vec<Weekday> = template
            .entries_for(EmployeeId(1))
            .iter()
            .map(|e| e.weekday)
            .collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);

        template.remove(EmployeeId(1), Weekday::Wed);
        assert_eq!(template.entries_for(EmployeeId(1)).len(), 2);
    }
}
