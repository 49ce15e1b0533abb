//! Shift definition model.
//!
//! This module defines the [`ShiftDefinition`] stored in the shift catalog:
//! a named time-of-day work interval that may span midnight.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Tolerance applied when a definition does not state one.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 10;

/// Represents a named work shift with local wall-clock entry and exit times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Unique shift code (e.g., "A", "C").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Scheduled entry time.
    pub entry_time: NaiveTime,
    /// Scheduled exit time.
    pub exit_time: NaiveTime,
    /// True when the shift ends on the calendar day after it starts.
    #[serde(default)]
    pub overnight: bool,
    /// Grace minutes after entry before a clock-in counts as late.
    #[serde(default = "default_tolerance")]
    pub tolerance_minutes: u32,
    /// Deactivated shifts keep resolving for existing references but cannot be newly assigned.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE_MINUTES
}

fn default_active() -> bool {
    true
}

impl ShiftDefinition {
    /// Creates a validated shift definition.
    ///
    /// An exit earlier than the entry marks the shift overnight automatically.
    /// An exit equal to the entry is only accepted when `overnight` is set
    /// (a full 24 hour shift), and an overnight flag on a shift that ends
    /// later the same day is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::ShiftDefinition;
    /// use chrono::NaiveTime;
    ///
    /// let night = ShiftDefinition::new(
    ///     "C",
    ///     "Night",
    ///     NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    ///     false,
    /// )
    /// .unwrap();
    /// assert!(night.overnight);
    /// assert_eq!(night.duration_hours(), 8.0);
    /// ```
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        entry_time: NaiveTime,
        exit_time: NaiveTime,
        overnight: bool,
    ) -> EngineResult<Self> {
        let shift = Self {
            code: code.into(),
            name: name.into(),
            entry_time,
            exit_time,
            overnight,
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            active: true,
        };
        shift.normalized()
    }

    /// Sets the tolerance, builder style.
    pub fn with_tolerance(mut self, tolerance_minutes: u32) -> Self {
        self.tolerance_minutes = tolerance_minutes;
        self
    }

    /// Checks the entry/exit invariant and infers the overnight flag.
    ///
    /// Used both on construction and on definitions deserialized from
    /// configuration or API payloads.
    pub fn normalized(mut self) -> EngineResult<Self> {
        if self.exit_time < self.entry_time {
            self.overnight = true;
        } else if self.exit_time == self.entry_time && !self.overnight {
            return Err(EngineError::InvalidShiftDefinition {
                code: self.code,
                message: "exit time must be after entry time unless the shift is overnight"
                    .to_string(),
            });
        } else if self.exit_time > self.entry_time && self.overnight {
            return Err(EngineError::InvalidShiftDefinition {
                code: self.code,
                message: "an overnight shift must end at or before its entry time".to_string(),
            });
        }
        Ok(self)
    }

    /// Length of the shift in hours, counting the midnight crossing.
    pub fn duration_hours(&self) -> f64 {
        let date = NaiveDate::MIN;
        let entry = date.and_time(self.entry_time);
        let mut exit = date.and_time(self.exit_time);
        if self.overnight {
            exit += TimeDelta::days(1);
        }
        (exit - entry).num_seconds() as f64 / 3600.0
    }

    /// The four stock shifts every installation starts with.
    pub fn standard_set() -> Vec<ShiftDefinition> {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        vec![
            Self::stock("A", "Shift A - Morning", hm(7, 0), hm(15, 0), false),
            Self::stock("B", "Shift B - Evening", hm(15, 0), hm(23, 0), false),
            Self::stock("C", "Shift C - Night", hm(23, 0), hm(7, 0), true),
            Self::stock("FIJO", "Fixed Shift", hm(8, 0), hm(18, 0), false),
        ]
    }

    fn stock(
        code: &str,
        name: &str,
        entry_time: NaiveTime,
        exit_time: NaiveTime,
        overnight: bool,
    ) -> ShiftDefinition {
        ShiftDefinition {
            code: code.to_string(),
            name: name.to_string(),
            entry_time,
            exit_time,
            overnight,
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            active: true,
        }
    }
}

impl std::fmt::Display for ShiftDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.code,
            self.entry_time.format("%H:%M"),
            self.exit_time.format("%H:%M")
        )
    }
}
