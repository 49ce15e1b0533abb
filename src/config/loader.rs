//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads and validates the engine configuration.
///
/// # File Layout
///
/// ```text
/// config/attendance.yaml
/// ├── timezone      # fixed local zone clock events are read in
/// ├── lateness      # default tolerance and overnight guard thresholds
/// ├── server        # bind address and log level for the binary
/// └── shifts        # catalog seed
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance.yaml").unwrap();
/// println!("Local zone: {}", loader.config().timezone.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value fails validation (see [`ConfigLoader::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses and validates configuration from YAML text.
    ///
    /// `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Validates an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let config = Self::validate(config)?;
        Ok(Self { config })
    }

    /// Checks ranges and normalizes the seeded shifts.
    ///
    /// Rejects an offset of a day or more, guard hours outside `0..=23`,
    /// duplicate shift codes and shifts whose times break the overnight rule.
    pub fn validate(mut config: EngineConfig) -> EngineResult<EngineConfig> {
        config.local_offset()?;

        let guard = config.lateness.overnight_guard;
        for (field, hour) in [
            ("lateness.overnight_guard.min_expected_hour", guard.min_expected_hour),
            ("lateness.overnight_guard.max_actual_hour", guard.max_actual_hour),
        ] {
            if hour > 23 {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} is not an hour of the day", hour),
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        let mut shifts = Vec::with_capacity(config.shifts.len());
        for shift in config.shifts {
            if !seen.insert(shift.code.clone()) {
                return Err(EngineError::InvalidConfig {
                    field: "shifts".to_string(),
                    message: format!("duplicate shift code '{}'", shift.code),
                });
            }
            let code = shift.code.clone();
            let shift = shift.normalized().map_err(|e| EngineError::InvalidConfig {
                field: format!("shifts.{}", code),
                message: e.to_string(),
            })?;
            shifts.push(shift);
        }
        config.shifts = shifts;

        Ok(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/attendance.yaml"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().timezone.name, "America/Mexico_City");
        assert_eq!(loader.config().timezone.utc_offset_minutes, -360);
        assert_eq!(loader.config().lateness.default_tolerance_minutes, 10);
    }

    #[test]
    fn test_seeded_shifts_loaded_and_normalized() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let shifts = &loader.config().shifts;

        assert_eq!(shifts.len(), 4);
        let night = shifts.iter().find(|s| s.code == "C").unwrap();
        assert!(night.overnight);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/attendance.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("attendance.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("timezone: [unterminated", "inline");
        assert!(matches!(
            result,
            Err(EngineError::ConfigParseError { ref path, .. }) if path == "inline"
        ));
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let yaml = "timezone:\n  utc_offset_minutes: 1500\n";
        match ConfigLoader::from_yaml_str(yaml, "inline") {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "timezone.utc_offset_minutes");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_guard_hour_out_of_range_rejected() {
        let yaml = "lateness:\n  overnight_guard:\n    min_expected_hour: 24\n";
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml, "inline"),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_duplicate_shift_codes_rejected() {
        let yaml = r#"
shifts:
  - { code: A, name: One, entry_time: "07:00:00", exit_time: "15:00:00" }
  - { code: A, name: Two, entry_time: "08:00:00", exit_time: "16:00:00" }
"#;
        match ConfigLoader::from_yaml_str(yaml, "inline") {
            Err(EngineError::InvalidConfig { message, .. }) => {
                assert!(message.contains("duplicate shift code 'A'"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_seed_shift_rejected() {
        let yaml = r#"
shifts:
  - { code: X, name: Zero, entry_time: "08:00:00", exit_time: "08:00:00" }
"#;
        match ConfigLoader::from_yaml_str(yaml, "inline") {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "shifts.X"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_is_valid() {
        let loader = ConfigLoader::from_yaml_str("{}", "inline").unwrap();
        assert!(loader.config().lateness.overnight_guard.enabled);
        assert_eq!(loader.config().server.bind_addr, "0.0.0.0:8080");
    }
}
