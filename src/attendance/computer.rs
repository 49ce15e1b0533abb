//! Clock event processing.
//!
//! The computer turns a clock event into a mutation of exactly one
//! attendance record. Each event runs as a single attendance-store
//! transaction: target-day selection, fetch-or-create, the entry/exit
//! mutation and the derived-field recompute all commit together or not at
//! all.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, OvernightGuard};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, ClockEventKind, EmployeeId};
use crate::schedule::ScheduleResolver;
use crate::store::{AttendanceStore, AttendanceTx};

use super::recompute_derived;

/// An administrative correction to one record; `None` fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordAmendment {
    /// New entry time.
    #[serde(default)]
    pub entry_time: Option<NaiveTime>,
    /// New exit time.
    #[serde(default)]
    pub exit_time: Option<NaiveTime>,
    /// New justified flag.
    #[serde(default)]
    pub justified: Option<bool>,
    /// New note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Records clock events against the attendance store.
#[derive(Debug, Clone)]
pub struct AttendanceComputer {
    resolver: Arc<ScheduleResolver>,
    store: Arc<AttendanceStore>,
    offset: FixedOffset,
    guard: OvernightGuard,
}

impl AttendanceComputer {
    /// Creates a computer using the timezone and guard from `config`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configured offset is out of range.
    pub fn new(
        resolver: Arc<ScheduleResolver>,
        store: Arc<AttendanceStore>,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        Ok(Self {
            resolver,
            store,
            offset: config.local_offset()?,
            guard: config.lateness.overnight_guard,
        })
    }

    /// The local offset events are converted into.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Records a clock event given as an instant in any timezone.
    ///
    /// The instant is converted to the configured local offset before it is
    /// split into date and time.
    pub fn record_clock_event<Tz: TimeZone>(
        &self,
        employee: EmployeeId,
        at: &DateTime<Tz>,
        kind: ClockEventKind,
    ) -> EngineResult<AttendanceRecord> {
        let local = at.with_timezone(&self.offset).naive_local();
        self.record_local_clock_event(employee, local, kind)
    }

    /// Records a clock event whose timestamp is already local wall-clock time.
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` if the target record already has an entry,
    /// `MissingEntry` for an exit with nothing to close and `DuplicateExit`
    /// if the target record already has an exit. Rejected events change
    /// nothing.
    pub fn record_local_clock_event(
        &self,
        employee: EmployeeId,
        local: NaiveDateTime,
        kind: ClockEventKind,
    ) -> EngineResult<AttendanceRecord> {
        let event_date = local.date();
        let event_time = local.time();

        let result = self.store.transaction(employee, |tx| {
            let target = match kind {
                ClockEventKind::Entry => event_date,
                ClockEventKind::Exit => self.exit_target(tx, event_date),
            };
            let mut record = tx.get_or_new(target);

            match kind {
                ClockEventKind::Entry => {
                    if let Some(existing) = record.entry_time {
                        return Err(EngineError::DuplicateEntry {
                            employee,
                            date: target,
                            existing,
                        });
                    }
                    record.entry_time = Some(event_time);
                }
                ClockEventKind::Exit => {
                    if record.entry_time.is_none() {
                        return Err(EngineError::MissingEntry {
                            employee,
                            date: target,
                        });
                    }
                    if let Some(existing) = record.exit_time {
                        return Err(EngineError::DuplicateExit {
                            employee,
                            date: target,
                            existing,
                        });
                    }
                    record.exit_time = Some(event_time);
                }
            }

            self.recompute_record(&mut record);
            tx.put(record.clone())?;
            Ok(record)
        });

        match &result {
            Ok(record) => info!(
                employee = %employee,
                kind = %kind,
                event = %local,
                record_date = %record.date,
                late = record.late,
                worked_hours = record.worked_hours,
                "Clock event recorded"
            ),
            Err(error) => warn!(
                employee = %employee,
                kind = %kind,
                event = %local,
                error = %error,
                "Clock event rejected"
            ),
        }
        result
    }

    /// An exit belongs to yesterday's record if that record is still open
    /// and yesterday's resolved schedule is overnight.
    fn exit_target(&self, tx: &AttendanceTx<'_>, event_date: NaiveDate) -> NaiveDate {
        let Some(yesterday) = event_date.checked_sub_signed(TimeDelta::days(1)) else {
            return event_date;
        };
        let open_yesterday = tx.get(yesterday).is_some_and(|r| r.is_open());
        if open_yesterday && self.resolver.is_overnight(tx.employee(), yesterday) {
            debug!(
                employee = %tx.employee(),
                event_date = %event_date,
                target = %yesterday,
                "Exit routed to previous day's overnight record"
            );
            return yesterday;
        }
        event_date
    }

    fn recompute_record(&self, record: &mut AttendanceRecord) {
        let schedule = match record.entry_time {
            Some(_) => self.resolver.resolve(record.employee, record.date),
            None => None,
        };
        recompute_derived(record, schedule.as_ref(), &self.guard);
    }

    /// Recomputes a stored record's derived fields against the current
    /// schedule, for example after a roster change.
    pub fn recompute(&self, employee: EmployeeId, date: NaiveDate) -> EngineResult<AttendanceRecord> {
        self.store.transaction(employee, |tx| {
            let mut record = tx
                .get(date)
                .ok_or(EngineError::RecordNotFound { employee, date })?;
            self.recompute_record(&mut record);
            tx.put(record.clone())?;
            Ok(record)
        })
    }

    /// Applies an administrative correction to an existing record.
    ///
    /// This is the only path that may overwrite a recorded entry or exit.
    pub fn amend(
        &self,
        employee: EmployeeId,
        date: NaiveDate,
        amendment: RecordAmendment,
    ) -> EngineResult<AttendanceRecord> {
        let record = self.store.transaction(employee, |tx| {
            let mut record = tx
                .get(date)
                .ok_or(EngineError::RecordNotFound { employee, date })?;

            if let Some(entry) = amendment.entry_time {
                record.entry_time = Some(entry);
            }
            if let Some(exit) = amendment.exit_time {
                record.exit_time = Some(exit);
            }
            if let Some(justified) = amendment.justified {
                record.justified = justified;
            }
            if let Some(note) = amendment.note {
                record.note = note;
            }
            if record.exit_time.is_some() && record.entry_time.is_none() {
                return Err(EngineError::MissingEntry { employee, date });
            }

            self.recompute_record(&mut record);
            tx.put(record.clone())?;
            Ok(record)
        })?;

        info!(
            employee = %employee,
            date = %date,
            late = record.late,
            justified = record.justified,
            "Attendance record amended"
        );
        Ok(record)
    }
}
