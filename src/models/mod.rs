//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod attendance;
mod employee;
mod roster;
mod schedule;
mod shift;
mod weekly;

pub use assignment::{AssignmentId, DateRangeAssignment, WeekdayMask};
pub use attendance::{AttendanceRecord, ClockEventKind, RecordState};
pub use employee::{Employee, EmployeeId};
pub use roster::{DailyOverride, RosterDay};
pub use schedule::{EffectiveSchedule, ScheduleAnswer, ScheduleSource};
pub use shift::{DEFAULT_TOLERANCE_MINUTES, ShiftDefinition};
pub use weekly::RecurringWeeklyEntry;
