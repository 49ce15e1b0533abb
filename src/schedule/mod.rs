//! Schedule resolution and assignment validation.
//!
//! This module contains:
//! - the [`ScheduleProvider`] trait and one provider per schedule source
//! - the [`ScheduleResolver`] that consults them in priority order
//! - the overlap validator guarding date-range assignment writes
//! - roster views derived from resolution

mod overlap;
mod provider;
mod resolver;
mod roster_view;

pub use overlap::{conflicts_with, validate_assignment};
pub use provider::{
    AssignmentProvider, OverrideProvider, ScheduleProvider, WeeklyTemplateProvider, pick_assignment,
};
pub use resolver::ScheduleResolver;
pub use roster_view::{RosterDayView, unscheduled_on, weekly_roster};
