//! In-memory tables for the five persisted collections.
//!
//! Each table is internally synchronized and shared behind an `Arc`. The
//! attendance store adds per-employee transactions and a uniqueness check
//! on (employee, date); the assignment book runs the overlap validator
//! under its write lock.

mod assignment_book;
mod attendance_store;
mod directory;
mod locks;
mod roster;
mod shift_catalog;
mod weekly_template;

pub use assignment_book::{
    AssignmentBook, AssignmentChanges, BulkAssignment, BulkAssignmentOutcome, NewAssignment,
};
pub use attendance_store::{AttendanceStore, AttendanceTx};
pub use directory::EmployeeDirectory;
pub use locks::EmployeeLocks;
pub use roster::Roster;
pub use shift_catalog::{SeedOutcome, ShiftCatalog};
pub use weekly_template::WeeklyTemplate;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// A panic while holding a table lock leaves the table itself consistent
// (every write is a single map operation), so poisoning is ignored.

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn acquire<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
