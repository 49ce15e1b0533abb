//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has
//! defaults, so an empty document is a valid configuration.

use chrono::{FixedOffset, NaiveTime, Timelike};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{DEFAULT_TOLERANCE_MINUTES, ShiftDefinition};

/// The single fixed local timezone clock events are interpreted in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// Display label for the zone.
    pub name: String,
    /// Offset from UTC in minutes (negative west of Greenwich).
    pub utc_offset_minutes: i32,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            name: "America/Mexico_City".to_string(),
            utc_offset_minutes: -360,
        }
    }
}

impl TimezoneConfig {
    /// The offset as a chrono value, or `None` if it is out of range.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}

/// Heuristic that stops the exit side of a night shift from being scored
/// as a very late entry.
///
/// When the expected entry is at or after `min_expected_hour` on an
/// overnight shift and the actual entry falls before `max_actual_hour`, the
/// entry is not considered late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OvernightGuard {
    /// Turns the guard off entirely.
    pub enabled: bool,
    /// Earliest expected entry hour the guard applies to.
    pub min_expected_hour: u32,
    /// Actual entries before this hour are excused.
    pub max_actual_hour: u32,
}

impl Default for OvernightGuard {
    fn default() -> Self {
        Self {
            enabled: true,
            min_expected_hour: 18,
            max_actual_hour: 12,
        }
    }
}

impl OvernightGuard {
    /// True if the guard excuses `actual` against an overnight shift expected at `expected`.
    pub fn excuses(&self, overnight: bool, expected: NaiveTime, actual: NaiveTime) -> bool {
        self.enabled
            && overnight
            && expected.hour() >= self.min_expected_hour
            && actual.hour() < self.max_actual_hour
    }
}

/// Lateness evaluation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatenessConfig {
    /// Tolerance used for overrides and date-range assignments.
    pub default_tolerance_minutes: u32,
    /// Overnight exit-side guard.
    pub overnight_guard: OvernightGuard,
}

impl Default for LatenessConfig {
    fn default() -> Self {
        Self {
            default_tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            overnight_guard: OvernightGuard::default(),
        }
    }
}

/// HTTP server settings used by the binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,
    /// Maximum tracing level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Local timezone.
    pub timezone: TimezoneConfig,
    /// Lateness policy.
    pub lateness: LatenessConfig,
    /// Server settings.
    pub server: ServerConfig,
    /// Shift definitions seeded into the catalog at start-up.
    pub shifts: Vec<ShiftDefinition>,
}

impl EngineConfig {
    /// Default configuration with the standard shift set seeded.
    pub fn with_standard_shifts() -> Self {
        Self {
            shifts: ShiftDefinition::standard_set(),
            ..Self::default()
        }
    }

    /// The local offset clock events are converted into.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when `timezone.utc_offset_minutes` is a day or more.
    pub fn local_offset(&self) -> EngineResult<FixedOffset> {
        self.timezone.offset().ok_or_else(|| EngineError::InvalidConfig {
            field: "timezone.utc_offset_minutes".to_string(),
            message: format!(
                "{} is outside the valid range of -1439..=1439",
                self.timezone.utc_offset_minutes
            ),
        })
    }
}
