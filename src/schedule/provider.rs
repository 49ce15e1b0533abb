//! Schedule sources behind a common trait.
//!
//! Each provider answers for a single source. A provider returns `None`
//! when it has nothing to say for the date, which lets the resolver fall
//! through to the next one; `Some(ScheduleAnswer::DayOff)` is definitive.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::models::{
    DateRangeAssignment, EffectiveSchedule, EmployeeId, RosterDay, ScheduleAnswer, ScheduleSource,
    ShiftDefinition,
};
use crate::store::{AssignmentBook, Roster, ShiftCatalog, WeeklyTemplate};

/// One source of expected shifts.
pub trait ScheduleProvider: Send + Sync {
    /// Which source this provider reads.
    fn source(&self) -> ScheduleSource;

    /// The provider's answer for `employee` on `date`, if any.
    fn lookup(&self, employee: EmployeeId, date: NaiveDate) -> Option<ScheduleAnswer>;
}

fn from_shift(shift: &ShiftDefinition, tolerance_minutes: u32, source: ScheduleSource) -> ScheduleAnswer {
    ScheduleAnswer::Scheduled(EffectiveSchedule {
        entry_time: shift.entry_time,
        tolerance_minutes,
        overnight: shift.overnight,
        shift_code: Some(shift.code.clone()),
        source,
    })
}

fn lookup_shift(
    catalog: &ShiftCatalog,
    code: &str,
    employee: EmployeeId,
    date: NaiveDate,
    source: ScheduleSource,
) -> Option<ShiftDefinition> {
    let shift = catalog.get(code);
    if shift.is_none() {
        warn!(
            employee = %employee,
            date = %date,
            shift_code = code,
            source = %source,
            "Referenced shift missing from catalog"
        );
    }
    shift
}

/// Day-level overrides from the roster.
#[derive(Debug, Clone)]
pub struct OverrideProvider {
    roster: Arc<Roster>,
    catalog: Arc<ShiftCatalog>,
    default_tolerance_minutes: u32,
}

impl OverrideProvider {
    /// Reads `roster`, resolving shift codes through `catalog`.
    pub fn new(roster: Arc<Roster>, catalog: Arc<ShiftCatalog>, default_tolerance_minutes: u32) -> Self {
        Self {
            roster,
            catalog,
            default_tolerance_minutes,
        }
    }
}

impl ScheduleProvider for OverrideProvider {
    fn source(&self) -> ScheduleSource {
        ScheduleSource::DailyOverride
    }

    fn lookup(&self, employee: EmployeeId, date: NaiveDate) -> Option<ScheduleAnswer> {
        let entry = self.roster.get(employee, date)?;
        match entry.day {
            RosterDay::RestDay => Some(ScheduleAnswer::DayOff),
            RosterDay::Shift { shift_code } => {
                let shift = lookup_shift(&self.catalog, &shift_code, employee, date, self.source())?;
                Some(from_shift(&shift, self.default_tolerance_minutes, self.source()))
            }
        }
    }
}

/// The recurring weekly template.
#[derive(Debug, Clone)]
pub struct WeeklyTemplateProvider {
    template: Arc<WeeklyTemplate>,
    catalog: Arc<ShiftCatalog>,
}

impl WeeklyTemplateProvider {
    /// Reads `template`; linked shifts are looked up in `catalog`.
    pub fn new(template: Arc<WeeklyTemplate>, catalog: Arc<ShiftCatalog>) -> Self {
        Self { template, catalog }
    }
}

impl ScheduleProvider for WeeklyTemplateProvider {
    fn source(&self) -> ScheduleSource {
        ScheduleSource::WeeklyTemplate
    }

    fn lookup(&self, employee: EmployeeId, date: NaiveDate) -> Option<ScheduleAnswer> {
        let entry = self.template.active_entry(employee, date.weekday())?;

        // A linked catalog shift decides overnight-ness; otherwise the times do.
        // The entry still answers when its linked shift has gone missing.
        let overnight = entry
            .shift_code
            .as_deref()
            .and_then(|code| lookup_shift(&self.catalog, code, employee, date, self.source()))
            .map_or_else(|| entry.crosses_midnight(), |shift| shift.overnight);

        Some(ScheduleAnswer::Scheduled(EffectiveSchedule {
            entry_time: entry.entry_time,
            tolerance_minutes: entry.tolerance_minutes,
            overnight,
            shift_code: entry.shift_code,
            source: self.source(),
        }))
    }
}

/// Date-range assignments.
#[derive(Debug, Clone)]
pub struct AssignmentProvider {
    book: Arc<AssignmentBook>,
    catalog: Arc<ShiftCatalog>,
    default_tolerance_minutes: u32,
}

impl AssignmentProvider {
    /// Reads `book`, resolving shift codes through `catalog`.
    pub fn new(book: Arc<AssignmentBook>, catalog: Arc<ShiftCatalog>, default_tolerance_minutes: u32) -> Self {
        Self {
            book,
            catalog,
            default_tolerance_minutes,
        }
    }
}

/// Picks one assignment when several apply: the latest start date wins,
/// then the lowest id.
pub fn pick_assignment(candidates: &[DateRangeAssignment]) -> Option<&DateRangeAssignment> {
    candidates
        .iter()
        .max_by(|a, b| a.start_date.cmp(&b.start_date).then(b.id.cmp(&a.id)))
}

impl ScheduleProvider for AssignmentProvider {
    fn source(&self) -> ScheduleSource {
        ScheduleSource::DateRangeAssignment
    }

    fn lookup(&self, employee: EmployeeId, date: NaiveDate) -> Option<ScheduleAnswer> {
        let candidates = self.book.applicable_on(employee, date);
        let chosen = pick_assignment(&candidates)?;
        if candidates.len() > 1 {
            warn!(
                employee = %employee,
                date = %date,
                candidates = candidates.len(),
                chosen = %chosen.id,
                "Multiple assignments apply, using the latest start date"
            );
        }
        let shift = lookup_shift(&self.catalog, &chosen.shift_code, employee, date, self.source())?;
        Some(from_shift(&shift, self.default_tolerance_minutes, self.source()))
    }
}
