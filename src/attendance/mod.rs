//! Attendance computation.
//!
//! This module contains:
//! - [`AttendanceComputer`], which applies clock events and corrections
//! - the derived-field functions for worked hours and lateness
//! - [`AttendanceSummary`] for reporting reads

mod computer;
mod derived;
mod summary;

pub use computer::{AttendanceComputer, RecordAmendment};
pub use derived::{is_late, recompute_derived, worked_hours};
pub use summary::AttendanceSummary;
