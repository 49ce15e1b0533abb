//! Schedule resolution.
//!
//! The resolver asks its providers in order and returns the first answer.
//! The standard order is daily override, then weekly template, then
//! date-range assignment.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EffectiveSchedule, EmployeeId, ScheduleAnswer, ScheduleSource};
use crate::store::{AssignmentBook, Roster, ShiftCatalog, WeeklyTemplate};

use super::{AssignmentProvider, OverrideProvider, ScheduleProvider, WeeklyTemplateProvider};

/// Resolves the effective schedule for an employee on a date.
///
/// Resolution is a pure read; nothing is cached.
pub struct ScheduleResolver {
    providers: Vec<Box<dyn ScheduleProvider>>,
}

impl std::fmt::Debug for ScheduleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<ScheduleSource> = self.providers.iter().map(|p| p.source()).collect();
        f.debug_struct("ScheduleResolver")
            .field("providers", &sources)
            .finish()
    }
}

impl ScheduleResolver {
    /// A resolver that consults `providers` in the given order.
    pub fn new(providers: Vec<Box<dyn ScheduleProvider>>) -> Self {
        Self { providers }
    }

    /// The standard resolver: override, weekly template, assignment.
    pub fn standard(
        catalog: Arc<ShiftCatalog>,
        roster: Arc<Roster>,
        template: Arc<WeeklyTemplate>,
        book: Arc<AssignmentBook>,
        default_tolerance_minutes: u32,
    ) -> Self {
        Self::new(vec![
            Box::new(OverrideProvider::new(
                roster,
                Arc::clone(&catalog),
                default_tolerance_minutes,
            )),
            Box::new(WeeklyTemplateProvider::new(template, Arc::clone(&catalog))),
            Box::new(AssignmentProvider::new(
                book,
                catalog,
                default_tolerance_minutes,
            )),
        ])
    }

    /// The sources consulted, in order.
    pub fn sources(&self) -> Vec<ScheduleSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// The first provider answer, distinguishing an explicit day off from
    /// no answer at all (`None`).
    pub fn resolve_answer(&self, employee: EmployeeId, date: NaiveDate) -> Option<ScheduleAnswer> {
        for provider in &self.providers {
            if let Some(answer) = provider.lookup(employee, date) {
                debug!(
                    employee = %employee,
                    date = %date,
                    source = %provider.source(),
                    day_off = matches!(answer, ScheduleAnswer::DayOff),
                    "Schedule resolved"
                );
                return Some(answer);
            }
        }
        debug!(employee = %employee, date = %date, "No schedule source answered");
        None
    }

    /// The effective schedule, or `None` for a rest day or no schedule.
    pub fn resolve(&self, employee: EmployeeId, date: NaiveDate) -> Option<EffectiveSchedule> {
        self.resolve_answer(employee, date)
            .and_then(ScheduleAnswer::into_schedule)
    }

    /// Like [`resolve`](Self::resolve) but an absent schedule is an error.
    pub fn require_schedule(
        &self,
        employee: EmployeeId,
        date: NaiveDate,
    ) -> EngineResult<EffectiveSchedule> {
        self.resolve(employee, date)
            .ok_or(EngineError::NoActiveSchedule { employee, date })
    }

    /// True if the schedule resolved for `date` crosses midnight.
    pub fn is_overnight(&self, employee: EmployeeId, date: NaiveDate) -> bool {
        self.resolve(employee, date).is_some_and(|s| s.overnight)
    }
}
