//! Daily override (roster) table.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::models::{DailyOverride, EmployeeId};

use super::{read, write};

/// At most one override per (employee, date).
#[derive(Debug, Default)]
pub struct Roster {
    overrides: RwLock<BTreeMap<(EmployeeId, NaiveDate), DailyOverride>>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the override for its key, returning the previous one.
    pub fn upsert(&self, entry: DailyOverride) -> Option<DailyOverride> {
        write(&self.overrides).insert((entry.employee, entry.date), entry)
    }

    /// The override for the key.
    pub fn get(&self, employee: EmployeeId, date: NaiveDate) -> Option<DailyOverride> {
        read(&self.overrides).get(&(employee, date)).cloned()
    }

    /// Deletes the override for the key.
    pub fn remove(&self, employee: EmployeeId, date: NaiveDate) -> Option<DailyOverride> {
        write(&self.overrides).remove(&(employee, date))
    }

    /// An employee's overrides within `[start, end]`, in date order.
    pub fn for_range(
        &self,
        employee: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyOverride> {
        if end < start {
            return Vec::new();
        }
        read(&self.overrides)
            .range((employee, start)..=(employee, end))
            .map(|(_, o)| o.clone())
            .collect()
    }
}
