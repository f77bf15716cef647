//! Invariant checking for deterministic simulation testing.
//!
//! This module provides infrastructure for verifying the simulation
//! protocol's invariants after each run: one diagnostic line per run with
//! the fixed key order, error codes present exactly on failures, and the
//! latency floors of each outcome.

// Simulation code legitimately needs cloning for test data
#![allow(clippy::disallowed_methods)]

use crate::catalog;
use crate::constants::{
    SERVICE_UNAVAILABLE_DELAY_MS, SIMLOG_PREFIX, SUCCESS_DELAY_MS, TIMEOUT_DELAY_MS,
};
use crate::types::{ErrorCode, FailureMode, RequestConfig, SimulationOutcome, StatusOrReason};

/// A recorded run in the simulation.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// The config the run was invoked with.
    pub config: RequestConfig,
    /// Whether the run succeeded.
    pub success: bool,
    /// The failure code, if any.
    pub error_code: Option<ErrorCode>,
    /// Measured latency from the run's log record.
    pub latency_ms: u64,
    /// Diagnostic lines the run emitted (one, if the engine behaves).
    pub simlog_lines: Vec<String>,
}

/// Tracks the history of runs for invariant checking.
#[derive(Debug, Default)]
pub struct RunHistory {
    /// All runs in order.
    runs: Vec<RunRecord>,
    /// Number of successful runs.
    successes: u64,
    /// Number of failed runs.
    failures: u64,
}

impl RunHistory {
    /// Create a new empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed run and the diagnostic lines it emitted.
    pub fn record(
        &mut self,
        config: RequestConfig,
        outcome: &SimulationOutcome,
        simlog_lines: Vec<String>,
    ) {
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }

        self.runs.push(RunRecord {
            config,
            success: outcome.is_success(),
            error_code: outcome.error_code(),
            latency_ms: outcome.log().latency_ms,
            simlog_lines,
        });
    }

    /// Get the number of recorded runs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if history is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of successful runs.
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of failed runs.
    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    /// All recorded runs, in order.
    #[must_use]
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }
}

/// An invariant violation detected during simulation.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// Run index where it was detected.
    pub run_index: usize,
    /// Additional context.
    pub context: String,
}

/// Checker for simulation-protocol invariants.
#[derive(Debug, Default)]
pub struct InvariantChecker {
    /// Detected violations.
    violations: Vec<InvariantViolation>,
}

impl InvariantChecker {
    /// Create a new invariant checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Get all violations.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }

    /// Check if any violations were detected.
    #[must_use]
    pub const fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Clear all recorded violations.
    pub fn clear(&mut self) {
        self.violations.clear();
    }

    /// Add a violation.
    pub fn add_violation(&mut self, violation: InvariantViolation) {
        self.violations.push(violation);
    }

    /// Check one completed run against every protocol invariant.
    ///
    /// `simlog_lines` are the diagnostic lines emitted during this run only.
    pub fn check_run(
        &mut self,
        config: RequestConfig,
        outcome: &SimulationOutcome,
        simlog_lines: &[String],
        run_index: usize,
    ) {
        self.check_diagnostic_lines(simlog_lines, run_index);
        self.check_error_code_matches_outcome(outcome, run_index);
        self.check_outcome_against_config(config, outcome, run_index);
    }

    /// Exactly one well-formed `SIMLOG: <json>` line per run, with the
    /// fixed key order.
    fn check_diagnostic_lines(&mut self, simlog_lines: &[String], run_index: usize) {
        if simlog_lines.len() != 1 {
            self.violation(
                run_index,
                format!("expected 1 diagnostic line, got {}", simlog_lines.len()),
                simlog_lines.join("\n"),
            );
            return;
        }

        let line = &simlog_lines[0];
        let Some(json) = line.strip_prefix(SIMLOG_PREFIX) else {
            self.violation(
                run_index,
                "diagnostic line missing SIMLOG prefix".to_string(),
                line.clone(),
            );
            return;
        };

        if serde_json::from_str::<serde_json::Value>(json).is_err() {
            self.violation(
                run_index,
                "diagnostic line is not valid JSON".to_string(),
                line.clone(),
            );
            return;
        }

        let key_positions: Vec<Option<usize>> = [
            "\"timestamp\"",
            "\"url\"",
            "\"method\"",
            "\"latencyMs\"",
            "\"statusOrReason\"",
            "\"errorCode\"",
        ]
        .iter()
        .map(|key| json.find(key))
        .collect();

        let in_order = key_positions
            .windows(2)
            .all(|pair| matches!((pair[0], pair[1]), (Some(a), Some(b)) if a < b));
        if !in_order {
            self.violation(
                run_index,
                "diagnostic line keys missing or out of order".to_string(),
                line.clone(),
            );
        }
    }

    /// `error_code` is absent if and only if the run succeeded.
    fn check_error_code_matches_outcome(&mut self, outcome: &SimulationOutcome, run_index: usize) {
        let log_code = outcome.log().error_code;
        if outcome.is_success() != log_code.is_none() {
            self.violation(
                run_index,
                "error code presence does not match outcome".to_string(),
                format!("success={}, error_code={log_code:?}", outcome.is_success()),
            );
        }
    }

    /// The outcome's shape, status, and latency floor follow the config.
    fn check_outcome_against_config(
        &mut self,
        config: RequestConfig,
        outcome: &SimulationOutcome,
        run_index: usize,
    ) {
        let log = outcome.log();

        if !config.inject_failure {
            match outcome {
                SimulationOutcome::Success { products, .. } => {
                    if products != catalog::products() {
                        self.violation(
                            run_index,
                            "success did not return the full catalog".to_string(),
                            format!("{} products", products.len()),
                        );
                    }
                    if log.status_or_reason != StatusOrReason::Status(200) {
                        self.violation(
                            run_index,
                            "success did not record status 200".to_string(),
                            format!("{:?}", log.status_or_reason),
                        );
                    }
                    self.check_latency_floor(log.latency_ms, SUCCESS_DELAY_MS, run_index);
                }
                SimulationOutcome::Failure { .. } => {
                    self.violation(
                        run_index,
                        "happy-path config produced a failure".to_string(),
                        String::new(),
                    );
                }
            }
            return;
        }

        let (expected_code, expected_reason, floor_ms) = match config.failure_mode {
            FailureMode::Timeout => (
                ErrorCode::NetTimeout,
                "Request timeout after 3000ms",
                TIMEOUT_DELAY_MS,
            ),
            FailureMode::ServiceUnavailable => (
                ErrorCode::Net503,
                "503 Service Unavailable",
                SERVICE_UNAVAILABLE_DELAY_MS,
            ),
        };

        if outcome.error_code() != Some(expected_code) {
            self.violation(
                run_index,
                format!("injected failure did not produce {expected_code}"),
                format!("{:?}", outcome.error_code()),
            );
        }
        if log.status_or_reason != StatusOrReason::Reason(expected_reason.to_string()) {
            self.violation(
                run_index,
                "injected failure recorded the wrong reason".to_string(),
                format!("{:?}", log.status_or_reason),
            );
        }
        self.check_latency_floor(log.latency_ms, floor_ms, run_index);
    }

    fn check_latency_floor(&mut self, latency_ms: u64, floor_ms: u64, run_index: usize) {
        if latency_ms < floor_ms {
            self.violation(
                run_index,
                format!("latency {latency_ms}ms below floor {floor_ms}ms"),
                String::new(),
            );
        }
    }

    fn violation(&mut self, run_index: usize, description: String, context: String) {
        self.violations.push(InvariantViolation {
            description,
            run_index,
            context,
        });
    }
}
