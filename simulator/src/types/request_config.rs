//! Per-run request configuration.
//!
//! A `RequestConfig` is a snapshot of the failure-injection selection taken
//! at the moment a run is triggered. It is immutable for the duration of that
//! run; the next run takes a fresh snapshot.

use std::str::FromStr;

/// Which synthetic failure to inject when injection is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// The request exceeds the timeout threshold (3000ms delay).
    Timeout,
    /// The service answers 503 after a short delay (800ms).
    ServiceUnavailable,
}

impl FailureMode {
    /// Both failure modes, in selection order.
    pub const ALL: [Self; 2] = [Self::Timeout, Self::ServiceUnavailable];
}

impl FromStr for FailureMode {
    type Err = String;

    /// Parse a failure mode from user input.
    ///
    /// Accepts `timeout`, `503`, and `service-unavailable`, ASCII
    /// case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use simulator::types::FailureMode;
    ///
    /// assert_eq!("503".parse(), Ok(FailureMode::ServiceUnavailable));
    /// assert_eq!("Timeout".parse(), Ok(FailureMode::Timeout));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "timeout" => Ok(Self::Timeout),
            "503" | "service-unavailable" => Ok(Self::ServiceUnavailable),
            other => Err(format!(
                "unknown failure mode '{other}' (expected 'timeout' or '503')"
            )),
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::ServiceUnavailable => write!(f, "503"),
        }
    }
}

/// Configuration for one simulated request.
///
/// Created fresh per invocation from the current toggle state and never
/// mutated during a run. When `inject_failure` is false, `failure_mode`
/// carries the idle selection and has no effect on the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestConfig {
    /// Whether to inject a synthetic failure instead of succeeding.
    pub inject_failure: bool,
    /// Which failure to inject when `inject_failure` is true.
    pub failure_mode: FailureMode,
}

impl RequestConfig {
    /// A normal, successful fetch (injection off).
    #[must_use]
    pub const fn happy_path() -> Self {
        Self {
            inject_failure: false,
            failure_mode: FailureMode::Timeout,
        }
    }

    /// A run that injects the given failure.
    #[must_use]
    pub const fn with_failure(mode: FailureMode) -> Self {
        Self {
            inject_failure: true,
            failure_mode: mode,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::happy_path()
    }
}
