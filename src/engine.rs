//! The attendance engine facade.
//!
//! [`AttendanceEngine`] owns every table, the schedule resolver and the
//! attendance computer, all wired from one [`EngineConfig`]. The HTTP layer
//! and the integration tests talk to it rather than to the parts.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::info;

use crate::attendance::AttendanceComputer;
use crate::config::{ConfigLoader, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, ClockEventKind, DailyOverride, DateRangeAssignment, Employee, EmployeeId,
    RecurringWeeklyEntry, RosterDay,
};
use crate::schedule::{RosterDayView, ScheduleResolver, unscheduled_on, weekly_roster};
use crate::store::{
    AssignmentBook, AttendanceStore, BulkAssignment, BulkAssignmentOutcome, EmployeeDirectory,
    NewAssignment, Roster, ShiftCatalog, WeeklyTemplate,
};

/// All engine components, wired together.
#[derive(Debug)]
pub struct AttendanceEngine {
    config: EngineConfig,
    catalog: Arc<ShiftCatalog>,
    template: Arc<WeeklyTemplate>,
    book: Arc<AssignmentBook>,
    roster: Arc<Roster>,
    directory: Arc<EmployeeDirectory>,
    store: Arc<AttendanceStore>,
    resolver: Arc<ScheduleResolver>,
    computer: AttendanceComputer,
}

impl AttendanceEngine {
    /// Validates `config`, then builds an engine and seeds the shift catalog
    /// from `config.shifts`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for anything [`ConfigLoader::validate`] rejects, such
    /// as an out-of-range UTC offset.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::EngineConfig;
    /// use attendance_engine::engine::AttendanceEngine;
    ///
    /// let engine = AttendanceEngine::new(EngineConfig::with_standard_shifts()).unwrap();
    /// assert_eq!(engine.catalog().list(true).len(), 4);
    /// ```
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let config = ConfigLoader::validate(config)?;
        let catalog = Arc::new(ShiftCatalog::new());
        catalog.seed(config.shifts.clone())?;

        let template = Arc::new(WeeklyTemplate::new());
        let book = Arc::new(AssignmentBook::new(Arc::clone(&catalog)));
        let roster = Arc::new(Roster::new());
        let directory = Arc::new(EmployeeDirectory::new());
        let store = Arc::new(AttendanceStore::new());

        let resolver = Arc::new(ScheduleResolver::standard(
            Arc::clone(&catalog),
            Arc::clone(&roster),
            Arc::clone(&template),
            Arc::clone(&book),
            config.lateness.default_tolerance_minutes,
        ));
        let computer = AttendanceComputer::new(Arc::clone(&resolver), Arc::clone(&store), &config)?;

        info!(
            timezone = %config.timezone.name,
            utc_offset_minutes = config.timezone.utc_offset_minutes,
            default_tolerance_minutes = config.lateness.default_tolerance_minutes,
            "Attendance engine initialised"
        );

        Ok(Self {
            config,
            catalog,
            template,
            book,
            roster,
            directory,
            store,
            resolver,
            computer,
        })
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shift catalog.
    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// The weekly template table.
    pub fn template(&self) -> &WeeklyTemplate {
        &self.template
    }

    /// The assignment book.
    pub fn assignments(&self) -> &AssignmentBook {
        &self.book
    }

    /// The daily override table.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The employee directory.
    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    /// The attendance store.
    pub fn attendance(&self) -> &AttendanceStore {
        &self.store
    }

    /// The schedule resolver.
    pub fn resolver(&self) -> &ScheduleResolver {
        &self.resolver
    }

    /// The attendance computer.
    pub fn computer(&self) -> &AttendanceComputer {
        &self.computer
    }

    /// Adds or replaces an employee in the directory.
    pub fn register_employee(&self, employee: Employee) {
        self.directory.upsert(employee);
    }

    /// Stores a weekly entry; a linked shift must exist and be active.
    pub fn set_weekly_entry(&self, entry: RecurringWeeklyEntry) -> EngineResult<()> {
        if let Some(code) = &entry.shift_code {
            self.catalog.require_active(code)?;
        }
        if entry.exit_time == entry.entry_time {
            return Err(EngineError::InvalidShiftDefinition {
                code: format!("weekly:{}:{}", entry.employee, entry.weekday),
                message: "exit time must differ from entry time".to_string(),
            });
        }
        info!(employee = %entry.employee, weekday = %entry.weekday, "Weekly entry stored");
        self.template.upsert(entry);
        Ok(())
    }

    /// Upserts a daily override; a shift override needs an active shift.
    pub fn set_override(&self, entry: DailyOverride) -> EngineResult<Option<DailyOverride>> {
        if let RosterDay::Shift { shift_code } = &entry.day {
            self.catalog.require_active(shift_code)?;
        }
        info!(
            employee = %entry.employee,
            date = %entry.date,
            rest_day = entry.day.is_rest_day(),
            "Daily override stored"
        );
        Ok(self.roster.upsert(entry))
    }

    /// Removes a daily override.
    pub fn clear_override(&self, employee: EmployeeId, date: NaiveDate) -> Option<DailyOverride> {
        self.roster.remove(employee, date)
    }

    /// Creates one assignment for an active employee.
    pub fn assign(&self, new: NewAssignment) -> EngineResult<DateRangeAssignment> {
        self.directory.require_active(new.employee)?;
        self.book.create(new)
    }

    /// Assigns one shift to many employees; unknown or inactive employees
    /// are reported per employee.
    pub fn assign_bulk(
        &self,
        employees: &[EmployeeId],
        bulk: BulkAssignment,
    ) -> EngineResult<BulkAssignmentOutcome> {
        self.catalog.require_active(&bulk.shift_code)?;

        let (known, unknown): (Vec<EmployeeId>, Vec<EmployeeId>) = employees
            .iter()
            .copied()
            .partition(|id| self.directory.require_active(*id).is_ok());

        let mut outcome = self.book.assign_bulk(&known, bulk)?;
        outcome.errors.extend(
            unknown
                .into_iter()
                .map(|id| (id, EngineError::EmployeeNotFound { id })),
        );
        Ok(outcome)
    }

    /// Records a clock event for an active employee at the given instant.
    ///
    /// Unknown and inactive employees get `EmployeeNotFound` and nothing is
    /// stored.
    pub fn record_clock_event<Tz: TimeZone>(
        &self,
        employee: EmployeeId,
        at: &DateTime<Tz>,
        kind: ClockEventKind,
    ) -> EngineResult<AttendanceRecord> {
        self.directory.require_active(employee)?;
        self.computer.record_clock_event(employee, at, kind)
    }

    /// The roster for `[start, end]`, optionally limited to a department.
    pub fn weekly_roster(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        department: Option<&str>,
    ) -> Vec<RosterDayView> {
        let employees = self.directory.active(department);
        weekly_roster(&self.resolver, &employees, start, end)
    }

    /// Active employees without a schedule or rest day on `date`.
    pub fn unscheduled_on(&self, date: NaiveDate, department: Option<&str>) -> Vec<Employee> {
        let employees = self.directory.active(department);
        unscheduled_on(&self.resolver, &employees, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekdayMask;
    use chrono::{NaiveTime, TimeZone, Utc, Weekday};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn engine() -> AttendanceEngine {
        let engine = AttendanceEngine::new(EngineConfig::with_standard_shifts()).unwrap();
        engine.register_employee(Employee::new(EmployeeId(1), "E1", "Ana", "Plant"));
        engine.register_employee(Employee::new(EmployeeId(2), "E2", "Luis", "Office"));
        engine
    }

    fn bulk(code: &str) -> BulkAssignment {
        BulkAssignment {
            shift_code: code.to_string(),
            start_date: make_date("2026-02-01"),
            end_date: Some(make_date("2026-02-28")),
            weekdays: WeekdayMask::default(),
            note: String::new(),
        }
    }

    #[test]
    fn test_new_seeds_catalog_from_config() {
        let engine = engine();
        assert!(engine.catalog().get("FIJO").is_some());
    }

    #[test]
    fn test_new_rejects_out_of_range_offset() {
        let mut config = EngineConfig::with_standard_shifts();
        config.timezone.utc_offset_minutes = 5000;
        assert!(matches!(
            AttendanceEngine::new(config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_new_uses_configured_offset() {
        let mut config = EngineConfig::with_standard_shifts();
        config.timezone.utc_offset_minutes = 120;
        let engine = AttendanceEngine::new(config).unwrap();
        engine.register_employee(Employee::new(EmployeeId(1), "E1", "Ana", "Plant"));

        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 5, 0).unwrap();
        let record = engine
            .record_clock_event(EmployeeId(1), &at, ClockEventKind::Entry)
            .unwrap();
        assert_eq!(record.entry_time, Some(make_time("16:05")));
    }

    #[test]
    fn test_clock_event_requires_active_employee() {
        let engine = engine();
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 14, 5, 0).unwrap();
        assert_eq!(
            engine.record_clock_event(EmployeeId(99), &at, ClockEventKind::Entry),
            Err(EngineError::EmployeeNotFound { id: EmployeeId(99) })
        );

        let mut inactive = Employee::new(EmployeeId(3), "E3", "Rosa", "Plant");
        inactive.active = false;
        engine.register_employee(inactive);
        assert!(engine.record_clock_event(EmployeeId(3), &at, ClockEventKind::Entry).is_err());
        assert!(engine.attendance().is_empty());
    }

    #[test]
    fn test_assign_requires_known_employee() {
        let engine = engine();
        let result = engine.assign(NewAssignment {
            employee: EmployeeId(99),
            shift_code: "A".to_string(),
            start_date: make_date("2026-02-01"),
            end_date: None,
            weekdays: WeekdayMask::default(),
            note: String::new(),
        });
        assert_eq!(result, Err(EngineError::EmployeeNotFound { id: EmployeeId(99) }));
    }

    #[test]
    fn test_assign_bulk_reports_unknown_employees() {
        let engine = engine();
        let outcome = engine
            .assign_bulk(&[EmployeeId(1), EmployeeId(2), EmployeeId(7)], bulk("B"))
            .unwrap();
        assert_eq!(outcome.created.len(), 2);
        assert_eq!(
            outcome.errors,
            vec![(EmployeeId(7), EngineError::EmployeeNotFound { id: EmployeeId(7) })]
        );
    }

    #[test]
    fn test_assign_bulk_inactive_shift_fails_call() {
        let engine = engine();
        engine.catalog().deactivate("B").unwrap();
        assert!(matches!(
            engine.assign_bulk(&[EmployeeId(1)], bulk("B")),
            Err(EngineError::InactiveShift { .. })
        ));
    }

    #[test]
    fn test_set_override_validates_shift() {
        let engine = engine();
        let date = make_date("2026-02-02");
        assert!(matches!(
            engine.set_override(DailyOverride::shift(EmployeeId(1), date, "Z")),
            Err(EngineError::ShiftNotFound { .. })
        ));
        assert!(
            engine
                .set_override(DailyOverride::rest_day(EmployeeId(1), date))
                .unwrap()
                .is_none()
        );
        assert!(engine.clear_override(EmployeeId(1), date).is_some());
    }

    #[test]
    fn test_set_weekly_entry_validates_linked_shift() {
        let engine = engine();
        let mut entry = RecurringWeeklyEntry::from_shift(
            EmployeeId(1),
            Weekday::Mon,
            &engine.catalog().get("A").unwrap(),
        );
        engine.set_weekly_entry(entry.clone()).unwrap();

        entry.shift_code = Some("Z".to_string());
        assert!(matches!(
            engine.set_weekly_entry(entry.clone()),
            Err(EngineError::ShiftNotFound { .. })
        ));

        entry.shift_code = None;
        entry.exit_time = make_time("07:00");
        assert!(matches!(
            engine.set_weekly_entry(entry),
            Err(EngineError::InvalidShiftDefinition { .. })
        ));
    }

    #[test]
    fn test_roster_views_filter_by_department() {
        let engine = engine();
        engine.assign_bulk(&[EmployeeId(1), EmployeeId(2)], bulk("A")).unwrap();

        // 2026-02-02 is a Monday.
        let days = engine.weekly_roster(make_date("2026-02-02"), make_date("2026-02-02"), Some("Plant"));
        assert_eq!(days[0].shifts.get("A"), Some(&vec![EmployeeId(1)]));

        let saturday = make_date("2026-02-07");
        assert_eq!(engine.unscheduled_on(saturday, None).len(), 2);
        assert_eq!(engine.unscheduled_on(saturday, Some("office")).len(), 1);
    }
}
