//! Resolved schedule values.
//!
//! These are derived on demand by the schedule resolver and never stored.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Which source produced a schedule answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// A day-level roster override.
    DailyOverride,
    /// The recurring weekly template.
    WeeklyTemplate,
    /// A date-range assignment.
    DateRangeAssignment,
}

impl std::fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleSource::DailyOverride => write!(f, "daily_override"),
            ScheduleSource::WeeklyTemplate => write!(f, "weekly_template"),
            ScheduleSource::DateRangeAssignment => write!(f, "date_range_assignment"),
        }
    }
}

/// The expected shift for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSchedule {
    /// Expected entry time.
    pub entry_time: NaiveTime,
    /// Grace minutes after entry.
    pub tolerance_minutes: u32,
    /// True when the shift ends the next calendar day.
    pub overnight: bool,
    /// Catalog shift behind the answer, if any.
    pub shift_code: Option<String>,
    /// Source that answered.
    pub source: ScheduleSource,
}

/// A provider's answer for a date.
///
/// `DayOff` is a definitive "not working" and stops resolution; a provider
/// with nothing to say returns `None` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleAnswer {
    /// The employee is expected to work.
    Scheduled(EffectiveSchedule),
    /// The employee is explicitly off.
    DayOff,
}

impl ScheduleAnswer {
    /// Collapses the answer into the resolver's result.
    pub fn into_schedule(self) -> Option<EffectiveSchedule> {
        match self {
            ScheduleAnswer::Scheduled(schedule) => Some(schedule),
            ScheduleAnswer::DayOff => None,
        }
    }
}
