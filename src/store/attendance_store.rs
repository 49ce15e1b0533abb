//! Attendance record store.
//!
//! Records are unique per (employee, date). Clock events run inside
//! [`AttendanceStore::transaction`], which serializes work per employee and
//! commits its staged writes all at once; a failing unit of work leaves the
//! store untouched.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, EmployeeId};

use super::{EmployeeLocks, acquire, read, write};

type RecordKey = (EmployeeId, NaiveDate);

/// In-memory attendance table with per-employee transactions.
#[derive(Debug, Default)]
pub struct AttendanceStore {
    records: RwLock<BTreeMap<RecordKey, AttendanceRecord>>,
    locks: EmployeeLocks,
}

#[derive(Debug)]
struct Staged {
    record: AttendanceRecord,
    is_new: bool,
}

/// A unit of work against one employee's records.
///
/// Reads see the transaction's own staged writes first.
#[derive(Debug)]
pub struct AttendanceTx<'a> {
    store: &'a AttendanceStore,
    employee: EmployeeId,
    staged: BTreeMap<NaiveDate, Staged>,
}

impl AttendanceTx<'_> {
    /// The employee this transaction is scoped to.
    pub fn employee(&self) -> EmployeeId {
        self.employee
    }

    /// The record for `date`, staged or committed.
    pub fn get(&self, date: NaiveDate) -> Option<AttendanceRecord> {
        match self.staged.get(&date) {
            Some(staged) => Some(staged.record.clone()),
            None => self.store.get(self.employee, date),
        }
    }

    /// The record for `date`, or a blank one if none exists.
    pub fn get_or_new(&self, date: NaiveDate) -> AttendanceRecord {
        self.get(date)
            .unwrap_or_else(|| AttendanceRecord::new(self.employee, date))
    }

    /// Stages a write for `record.date`.
    ///
    /// The record must belong to the transaction's employee.
    pub fn put(&mut self, record: AttendanceRecord) -> EngineResult<()> {
        if record.employee != self.employee {
            return Err(EngineError::RecordConflict {
                employee: record.employee,
                date: record.date,
            });
        }
        let is_new = match self.staged.get(&record.date) {
            Some(staged) => staged.is_new,
            None => self.store.get(self.employee, record.date).is_none(),
        };
        self.staged.insert(record.date, Staged { record, is_new });
        Ok(())
    }

    fn commit(self) -> EngineResult<usize> {
        let store = self.store;
        let mut records = write(&store.records);

        // Someone may have inserted outside a transaction since we looked.
        if let Some((date, _)) = self
            .staged
            .iter()
            .find(|(date, staged)| staged.is_new && records.contains_key(&(self.employee, **date)))
        {
            return Err(EngineError::RecordConflict {
                employee: self.employee,
                date: *date,
            });
        }

        let count = self.staged.len();
        for (date, staged) in self.staged {
            records.insert((self.employee, date), staged.record);
        }
        Ok(count)
    }
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for (employee, date).
    pub fn get(&self, employee: EmployeeId, date: NaiveDate) -> Option<AttendanceRecord> {
        read(&self.records).get(&(employee, date)).cloned()
    }

    /// Inserts a record whose key must not exist yet.
    pub fn insert(&self, record: AttendanceRecord) -> EngineResult<()> {
        let mut records = write(&self.records);
        let key = (record.employee, record.date);
        if records.contains_key(&key) {
            return Err(EngineError::RecordConflict {
                employee: record.employee,
                date: record.date,
            });
        }
        records.insert(key, record);
        Ok(())
    }

    /// Records with `start <= date <= end`, optionally for one employee,
    /// ordered by date then employee.
    pub fn range(
        &self,
        employee: Option<EmployeeId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        if end < start {
            return Vec::new();
        }
        let records = read(&self.records);
        let mut found: Vec<AttendanceRecord> = match employee {
            Some(id) => records
                .range((id, start)..=(id, end))
                .map(|(_, r)| r.clone())
                .collect(),
            None => records
                .values()
                .filter(|r| r.date >= start && r.date <= end)
                .cloned()
                .collect(),
        };
        found.sort_by_key(|r| (r.date, r.employee));
        found
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        read(&self.records).len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `work` with exclusive access to `employee`'s records.
    ///
    /// Staged writes are committed only if `work` returns `Ok`; commit
    /// fails with `RecordConflict` if a staged new record's key appeared
    /// in the meantime.
    pub fn transaction<T, F>(&self, employee: EmployeeId, work: F) -> EngineResult<T>
    where
        F: FnOnce(&mut AttendanceTx<'_>) -> EngineResult<T>,
    {
        let handle = self.locks.handle(employee);
        let _guard = acquire(&handle);

        let mut tx = AttendanceTx {
            store: self,
            employee,
            staged: BTreeMap::new(),
        };
        let value = work(&mut tx)?;
        let written = tx.commit()?;
        debug!(employee = %employee, written, "Attendance transaction committed");
        Ok(value)
    }
}
