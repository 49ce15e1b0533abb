//! Configuration loading and management for the attendance engine.
//!
//! This module provides functionality to load the engine configuration from
//! a YAML file: the fixed local timezone, lateness policy, server settings
//! and the shift catalog seed.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Tolerance: {} min", config.config().lateness.default_tolerance_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, LatenessConfig, OvernightGuard, ServerConfig, TimezoneConfig};
