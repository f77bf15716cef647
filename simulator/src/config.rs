//! Simulator configuration.
//!
//! This module provides configuration loading for the simulator from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `SIM_INJECT_FAILURE`: Whether failure injection starts enabled (default: `false`)
//! - `SIM_FAILURE_MODE`: Which failure to inject when enabled (default: `timeout`)
//!
//! Both variables are optional; set-but-invalid values are errors, not
//! silently replaced with defaults.

use std::str::FromStr as _;

use crate::types::FailureMode;

/// Startup configuration for the simulator.
///
/// Seeds the session's initial toggle state; the interactive commands can
/// change both values afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Whether failure injection starts enabled.
    pub inject_failure: bool,
    /// Which failure to inject when injection is enabled.
    pub failure_mode: FailureMode,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimulatorConfig {
    /// Default failure-injection state.
    pub const DEFAULT_INJECT_FAILURE: bool = false;
    /// Default failure mode.
    pub const DEFAULT_FAILURE_MODE: FailureMode = FailureMode::Timeout;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SIM_INJECT_FAILURE` is set but is not one of `true`, `false`, `1`, `0`
    /// - `SIM_FAILURE_MODE` is set but is not a known failure mode
    pub fn from_env() -> Result<Self, ConfigError> {
        let inject_failure = Self::parse_inject_failure(std::env::var("SIM_INJECT_FAILURE").ok())?;
        let failure_mode = Self::parse_failure_mode(std::env::var("SIM_FAILURE_MODE").ok())?;

        Ok(Self {
            inject_failure,
            failure_mode,
        })
    }

    /// Parse the failure-injection flag.
    ///
    /// Returns the default if the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a recognized boolean.
    fn parse_inject_failure(value: Option<String>) -> Result<bool, ConfigError> {
        match value.as_deref() {
            None => Ok(Self::DEFAULT_INJECT_FAILURE),
            Some("true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(other) => Err(ConfigError::InvalidValue {
                name: "SIM_INJECT_FAILURE".to_string(),
                message: format!("'{other}' is not a boolean (must be true, false, 1, or 0)"),
            }),
        }
    }

    /// Parse the failure mode.
    ///
    /// Returns the default if the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a known failure mode.
    fn parse_failure_mode(value: Option<String>) -> Result<FailureMode, ConfigError> {
        match value {
            None => Ok(Self::DEFAULT_FAILURE_MODE),
            Some(raw) => {
                FailureMode::from_str(&raw).map_err(|message| ConfigError::InvalidValue {
                    name: "SIM_FAILURE_MODE".to_string(),
                    message,
                })
            }
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            inject_failure: Self::DEFAULT_INJECT_FAILURE,
            failure_mode: Self::DEFAULT_FAILURE_MODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SimulatorConfig::default();
        assert!(!config.inject_failure);
        assert_eq!(config.failure_mode, FailureMode::Timeout);
    }

    #[test]
    fn test_parse_inject_failure_unset_uses_default() {
        assert_eq!(SimulatorConfig::parse_inject_failure(None), Ok(false));
    }

    #[test]
    fn test_parse_inject_failure_accepted_forms() {
        for raw in ["true", "1"] {
            assert_eq!(
                SimulatorConfig::parse_inject_failure(Some(raw.to_string())),
                Ok(true)
            );
        }
        for raw in ["false", "0"] {
            assert_eq!(
                SimulatorConfig::parse_inject_failure(Some(raw.to_string())),
                Ok(false)
            );
        }
    }

    #[test]
    fn test_parse_inject_failure_rejects_garbage() {
        let err = SimulatorConfig::parse_inject_failure(Some("yes".to_string())).unwrap_err();
        assert!(err.to_string().contains("SIM_INJECT_FAILURE"));
        assert!(err.to_string().contains("yes"));
    }

    #[test]
    fn test_parse_failure_mode_unset_uses_default() {
        assert_eq!(
            SimulatorConfig::parse_failure_mode(None),
            Ok(FailureMode::Timeout)
        );
    }

    #[test]
    fn test_parse_failure_mode_accepted_forms() {
        assert_eq!(
            SimulatorConfig::parse_failure_mode(Some("timeout".to_string())),
            Ok(FailureMode::Timeout)
        );
        assert_eq!(
            SimulatorConfig::parse_failure_mode(Some("503".to_string())),
            Ok(FailureMode::ServiceUnavailable)
        );
        assert_eq!(
            SimulatorConfig::parse_failure_mode(Some("Service-Unavailable".to_string())),
            Ok(FailureMode::ServiceUnavailable)
        );
    }

    #[test]
    fn test_parse_failure_mode_rejects_unknown() {
        let err = SimulatorConfig::parse_failure_mode(Some("retry".to_string())).unwrap_err();
        assert!(err.to_string().contains("SIM_FAILURE_MODE"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::InvalidValue {
            name: "TEST_VAR".to_string(),
            message: "bad value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid value for TEST_VAR: bad value");
    }
}
