//! Main simulation harness for deterministic testing.
//!
//! This module ties together the simulation components: a simulated clock,
//! a capturing diagnostic sink, seeded config generation, and invariant
//! checking after each run.

// Simulation code legitimately needs cloning for test data
#![allow(clippy::disallowed_methods)]

use std::sync::Arc;

use crate::diag::{DiagnosticSink, MemorySink};
use crate::engine::SimulationEngine;

use super::clock::SimulatedClock;
use super::config_gen::ConfigGenerator;
use super::invariants::{InvariantChecker, InvariantViolation, RunHistory};

/// Configuration for the harness.
#[derive(Debug, Clone, Copy)]
pub struct HarnessConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Probability that a generated config injects a failure (0.0 to 1.0).
    pub failure_rate: f64,
    /// Probability that an injected failure is a timeout (0.0 to 1.0).
    pub timeout_rate: f64,
}

impl HarnessConfig {
    /// Create a new harness config with the given seed.
    ///
    /// Uses a 50% failure rate and an even split between the failure modes.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            failure_rate: 0.5,
            timeout_rate: 0.5,
        }
    }

    /// Set the failure-injection rate.
    #[must_use]
    pub const fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    /// Set the timeout share of injected failures.
    #[must_use]
    pub const fn with_timeout_rate(mut self, rate: f64) -> Self {
        self.timeout_rate = rate;
        self
    }
}

/// Results from a harness run.
#[derive(Debug)]
pub struct HarnessReport {
    /// The seed used for this run.
    pub seed: u64,
    /// Number of runs executed.
    pub runs: usize,
    /// Number of successful outcomes.
    pub successes: u64,
    /// Number of failure outcomes (injected, therefore expected).
    pub failures: u64,
    /// Invariant violations detected.
    pub violations: Vec<InvariantViolation>,
}

impl HarnessReport {
    /// Check if the run passed (no invariant violations).
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// The main simulation harness.
///
/// Runs a fresh engine on simulated time: no real waiting, fully
/// deterministic per seed.
pub struct Harness {
    config: HarnessConfig,
    generator: ConfigGenerator,
    history: RunHistory,
    checker: InvariantChecker,
}

impl Harness {
    /// Create a new harness with the given configuration.
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        let generator = ConfigGenerator::new(config.seed)
            .with_failure_rate(config.failure_rate)
            .with_timeout_rate(config.timeout_rate);

        Self {
            config,
            generator,
            history: RunHistory::new(),
            checker: InvariantChecker::new(),
        }
    }

    /// Execute `run_count` simulated requests, checking invariants after
    /// each one.
    pub fn run(&mut self, run_count: usize) -> HarnessReport {
        let clock = SimulatedClock::default_start();
        let sink = Arc::new(MemorySink::new());
        let engine = SimulationEngine::with_clock_and_sink(
            clock.clone(),
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );

        #[allow(clippy::expect_used)] // Runtime creation failure is fatal
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to create runtime");

        for _ in 0..run_count {
            let request_config = self.generator.next_config();
            let lines_before = sink.len();

            let outcome = runtime.block_on(engine.run(request_config));

            let simlog_lines: Vec<String> = sink.lines()[lines_before..].to_vec();
            self.checker
                .check_run(request_config, &outcome, &simlog_lines, self.history.len());
            self.history.record(request_config, &outcome, simlog_lines);

            // Idle time between runs, so consecutive timestamps differ.
            clock.advance(1);
        }

        HarnessReport {
            seed: self.config.seed,
            runs: self.history.len(),
            successes: self.history.successes(),
            failures: self.history.failures(),
            violations: self.checker.violations().to_vec(),
        }
    }

    /// The run history accumulated so far.
    #[must_use]
    pub const fn history(&self) -> &RunHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_passes_with_mixed_outcomes() {
        let mut harness = Harness::new(HarnessConfig::new(42));
        let report = harness.run(200);

        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.runs, 200);
        assert!(report.successes > 0);
        assert!(report.failures > 0);
        assert_eq!(report.successes + report.failures, 200);
    }

    #[test]
    fn test_harness_all_happy_path() {
        let mut harness = Harness::new(HarnessConfig::new(7).with_failure_rate(0.0));
        let report = harness.run(50);

        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.successes, 50);
        assert_eq!(report.failures, 0);
    }

    #[test]
    fn test_harness_all_failures() {
        let mut harness = Harness::new(HarnessConfig::new(7).with_failure_rate(1.0));
        let report = harness.run(50);

        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.successes, 0);
        assert_eq!(report.failures, 50);
    }

    #[test]
    fn test_harness_deterministic_per_seed() {
        let report1 = Harness::new(HarnessConfig::new(1234)).run(100);
        let report2 = Harness::new(HarnessConfig::new(1234)).run(100);

        assert_eq!(report1.successes, report2.successes);
        assert_eq!(report1.failures, report2.failures);
    }

    #[test]
    fn test_harness_records_history() {
        let mut harness = Harness::new(HarnessConfig::new(5));
        harness.run(10);

        assert_eq!(harness.history().len(), 10);
        for record in harness.history().runs() {
            assert_eq!(record.simlog_lines.len(), 1);
        }
    }
}
