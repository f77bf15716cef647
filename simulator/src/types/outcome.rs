//! Tagged result of one simulation run.

use crate::types::log_record::{ErrorCode, LogRecord};
use crate::types::product::Product;

/// Typed error for an injected failure.
///
/// The `Display` form is the user-visible failure message; the error also
/// knows its machine-readable code and the reason string recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// The request ran past the timeout threshold.
    Timeout,
    /// The service answered 503 Service Unavailable.
    ServiceUnavailable,
}

impl SimulationError {
    /// The machine-readable code recorded in the log.
    #[must_use]
    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::NetTimeout,
            Self::ServiceUnavailable => ErrorCode::Net503,
        }
    }

    /// The reason string recorded as `statusOrReason` in the log.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Timeout => "Request timeout after 3000ms",
            Self::ServiceUnavailable => "503 Service Unavailable",
        }
    }
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "Network failure: request timed out"),
            Self::ServiceUnavailable => write!(f, "Network failure: 503 Service Unavailable"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// The outcome of one simulation run.
///
/// Both variants carry the run's log record: exactly one record exists per
/// run regardless of outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    /// The simulated fetch succeeded.
    Success {
        /// The full static catalog.
        products: Vec<Product>,
        /// Audit record for this run.
        log: LogRecord,
    },
    /// An injected failure completed the run.
    Failure {
        /// The injected failure.
        error: SimulationError,
        /// Audit record for this run.
        log: LogRecord,
    },
}

impl SimulationOutcome {
    /// The log record of this run.
    #[must_use]
    pub const fn log(&self) -> &LogRecord {
        match self {
            Self::Success { log, .. } | Self::Failure { log, .. } => log,
        }
    }

    /// Whether this run succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure code, `None` exactly when the run succeeded.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error.error_code()),
        }
    }
}
