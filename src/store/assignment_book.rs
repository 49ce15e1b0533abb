//! Date-range assignment book.
//!
//! Every write runs the overlap validator against the stored assignments
//! while the book's write lock is held, so two concurrent writes for the
//! same employee cannot both pass validation.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentId, DateRangeAssignment, EmployeeId, WeekdayMask};
use crate::schedule::validate_assignment;

use super::{ShiftCatalog, read, write};

/// Input for creating one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    /// The employee.
    pub employee: EmployeeId,
    /// Code of an active catalog shift.
    pub shift_code: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive); omit for open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Applicable weekdays; defaults to Monday–Friday.
    #[serde(default)]
    pub weekdays: WeekdayMask,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

/// A partial update; `None` fields are left unchanged.
///
/// `end_date: Some(None)` reopens the assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentChanges {
    /// New shift code.
    pub shift_code: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<Option<NaiveDate>>,
    /// New weekday mask.
    pub weekdays: Option<WeekdayMask>,
    /// New note.
    pub note: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

/// One shift assigned to many employees at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAssignment {
    /// Code of an active catalog shift.
    pub shift_code: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive); omit for open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Applicable weekdays; defaults to Monday–Friday.
    #[serde(default)]
    pub weekdays: WeekdayMask,
    /// Free-text note copied to each assignment.
    #[serde(default)]
    pub note: String,
}

/// Result of a bulk assignment: successes and per-employee failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkAssignmentOutcome {
    /// Assignments that were stored.
    pub created: Vec<DateRangeAssignment>,
    /// Employees whose assignment was rejected, with the reason.
    pub errors: Vec<(EmployeeId, EngineError)>,
}

#[derive(Debug, Default)]
struct BookInner {
    next_id: u64,
    assignments: BTreeMap<AssignmentId, DateRangeAssignment>,
}

impl BookInner {
    fn issue_id(&mut self) -> AssignmentId {
        self.next_id += 1;
        AssignmentId(self.next_id)
    }

    fn validate_and_store(&mut self, candidate: DateRangeAssignment) -> EngineResult<()> {
        validate_assignment(&candidate, self.assignments.values())?;
        self.assignments.insert(candidate.id, candidate);
        Ok(())
    }
}

/// Stores date-range assignments and enforces the no-overlap rule.
#[derive(Debug)]
pub struct AssignmentBook {
    catalog: Arc<ShiftCatalog>,
    inner: RwLock<BookInner>,
}

impl AssignmentBook {
    /// Creates an empty book that checks shift codes against `catalog`.
    pub fn new(catalog: Arc<ShiftCatalog>) -> Self {
        Self {
            catalog,
            inner: RwLock::new(BookInner::default()),
        }
    }

    /// Validates and stores a new active assignment.
    ///
    /// # Errors
    ///
    /// `ShiftNotFound`/`InactiveShift` for a bad shift code,
    /// `InvalidAssignmentRange` for an empty mask or inverted range and
    /// `ConflictingAssignment` when it overlaps an existing active one.
    pub fn create(&self, new: NewAssignment) -> EngineResult<DateRangeAssignment> {
        self.catalog.require_active(&new.shift_code)?;

        let mut inner = write(&self.inner);
        let id = inner.issue_id();
        let assignment = DateRangeAssignment {
            id,
            employee: new.employee,
            shift_code: new.shift_code,
            start_date: new.start_date,
            end_date: new.end_date,
            weekdays: new.weekdays,
            note: new.note,
            active: true,
        };
        inner.validate_and_store(assignment.clone())?;

        info!(
            assignment_id = %id,
            employee = %assignment.employee,
            range = %assignment.describe(),
            "Assignment created"
        );
        Ok(assignment)
    }

    /// Applies `changes` to an existing assignment.
    ///
    /// The overlap check runs only when the dates, weekdays or active flag
    /// change. A changed shift code must be active; an unchanged one may
    /// have been deactivated since.
    pub fn update(
        &self,
        id: AssignmentId,
        changes: AssignmentChanges,
    ) -> EngineResult<DateRangeAssignment> {
        if let Some(code) = &changes.shift_code {
            self.catalog.require_active(code)?;
        }

        let mut inner = write(&self.inner);
        let current = inner
            .assignments
            .get(&id)
            .cloned()
            .ok_or(EngineError::AssignmentNotFound { id })?;
        let mut updated = current.clone();

        if let Some(code) = changes.shift_code {
            updated.shift_code = code;
        }
        if let Some(start) = changes.start_date {
            updated.start_date = start;
        }
        if let Some(end) = changes.end_date {
            updated.end_date = end;
        }
        if let Some(weekdays) = changes.weekdays {
            updated.weekdays = weekdays;
        }
        if let Some(note) = changes.note {
            updated.note = note;
        }
        if let Some(active) = changes.active {
            updated.active = active;
        }

        // Only the span, the mask and the active flag can create an overlap.
        let reshaped = updated.start_date != current.start_date
            || updated.end_date != current.end_date
            || updated.weekdays != current.weekdays
            || updated.active != current.active;
        if reshaped {
            inner.validate_and_store(updated.clone())?;
        } else {
            inner.assignments.insert(id, updated.clone());
        }
        info!(assignment_id = %id, range = %updated.describe(), "Assignment updated");
        Ok(updated)
    }

    /// Closes an assignment on `end_date`.
    pub fn end_on(&self, id: AssignmentId, end_date: NaiveDate) -> EngineResult<DateRangeAssignment> {
        self.update(
            id,
            AssignmentChanges {
                end_date: Some(Some(end_date)),
                ..Default::default()
            },
        )
    }

    /// Deactivates an assignment so resolution and overlap checks ignore it.
    pub fn deactivate(&self, id: AssignmentId) -> EngineResult<DateRangeAssignment> {
        self.update(
            id,
            AssignmentChanges {
                active: Some(false),
                ..Default::default()
            },
        )
    }

    /// Reactivates an assignment; fails if it now overlaps another active one.
    pub fn reactivate(&self, id: AssignmentId) -> EngineResult<DateRangeAssignment> {
        self.update(
            id,
            AssignmentChanges {
                active: Some(true),
                ..Default::default()
            },
        )
    }

    /// Creates the same assignment for each employee.
    ///
    /// The shift code is checked once and fails the whole call; range and
    /// overlap failures are reported per employee without stopping the rest.
    pub fn assign_bulk(
        &self,
        employees: &[EmployeeId],
        bulk: BulkAssignment,
    ) -> EngineResult<BulkAssignmentOutcome> {
        self.catalog.require_active(&bulk.shift_code)?;

        let mut outcome = BulkAssignmentOutcome::default();
        for &employee in employees {
            let new = NewAssignment {
                employee,
                shift_code: bulk.shift_code.clone(),
                start_date: bulk.start_date,
                end_date: bulk.end_date,
                weekdays: bulk.weekdays,
                note: bulk.note.clone(),
            };
            match self.create(new) {
                Ok(assignment) => outcome.created.push(assignment),
                Err(error) => {
                    warn!(employee = %employee, error = %error, "Bulk assignment skipped employee");
                    outcome.errors.push((employee, error));
                }
            }
        }

        info!(
            shift_code = %bulk.shift_code,
            created = outcome.created.len(),
            failed = outcome.errors.len(),
            "Bulk assignment finished"
        );
        Ok(outcome)
    }

    /// Looks up an assignment by id.
    pub fn get(&self, id: AssignmentId) -> Option<DateRangeAssignment> {
        read(&self.inner).assignments.get(&id).cloned()
    }

    /// All of an employee's assignments, active or not, by id.
    pub fn list_for_employee(&self, employee: EmployeeId) -> Vec<DateRangeAssignment> {
        read(&self.inner)
            .assignments
            .values()
            .filter(|a| a.employee == employee)
            .cloned()
            .collect()
    }

    /// An employee's active assignments whose interval covers `date`,
    /// regardless of weekday.
    pub fn active_on(
        &self,
        employee: EmployeeId,
        date: NaiveDate,
    ) -> Vec<DateRangeAssignment> {
        read(&self.inner)
            .assignments
            .values()
            .filter(|a| a.employee == employee && a.active && a.covers(date))
            .cloned()
            .collect()
    }

    /// An employee's assignments that apply on `date` (active, covering, weekday set).
    pub fn applicable_on(&self, employee: EmployeeId, date: NaiveDate) -> Vec<DateRangeAssignment> {
        read(&self.inner)
            .assignments
            .values()
            .filter(|a| a.employee == employee && a.applies_on(date))
            .cloned()
            .collect()
    }

    /// Inserts a pre-built assignment without validation.
    ///
    /// Exists to model rows written before the validator was in place;
    /// resolution must still cope with overlaps among them.
    pub fn import_unchecked(&self, assignment: DateRangeAssignment) {
        let mut inner = write(&self.inner);
        inner.next_id = inner.next_id.max(assignment.id.0);
        inner.assignments.insert(assignment.id, assignment);
    }
}
