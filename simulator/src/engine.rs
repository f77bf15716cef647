//! The simulation engine.
//!
//! Runs exactly one simulated product fetch per invocation: a timed delay,
//! one log record, one outcome. The engine holds no presentation state; it
//! takes a [`RequestConfig`] value and returns a [`SimulationOutcome`] value,
//! emitting one diagnostic line along the way.
//!
//! # Invariants
//!
//! - Exactly one log record is built per invocation, success or failure.
//! - Exactly one `SIMLOG: <json>` line is emitted per invocation.
//! - `error_code` is `None` if and only if the outcome is `Success`.
//! - Latency is measured from invocation start via the clock, never copied
//!   from the delay constants, so scheduler jitter is reflected.
//!
//! The engine does not serialize callers: one run per engine at a time is the
//! caller's responsibility (see [`Session`](crate::session::Session), whose
//! trigger takes `&mut self` for the duration of a run).

use std::sync::Arc;

use crate::catalog;
use crate::clock::{Clock, SystemClock};
use crate::constants::{
    REQUEST_METHOD, REQUEST_URL, SERVICE_UNAVAILABLE_DELAY_MS, SIMLOG_PREFIX, SUCCESS_DELAY_MS,
    SUCCESS_STATUS, TIMEOUT_DELAY_MS,
};
use crate::diag::{DiagnosticSink, StderrSink};
use crate::types::{
    ErrorCode, FailureMode, LogRecord, RequestConfig, SimulationError, SimulationOutcome,
    StatusOrReason,
};

/// One-shot request simulator.
///
/// Generic over the clock so tests and the simulation harness can run on
/// simulated time; production uses [`SystemClock`].
pub struct SimulationEngine<C: Clock> {
    clock: C,
    sink: Arc<dyn DiagnosticSink>,
}

impl SimulationEngine<SystemClock> {
    /// Create an engine on the system clock, emitting diagnostics to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SimulationEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SimulationEngine<C> {
    /// Create an engine on the given clock, emitting diagnostics to stderr.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self::with_clock_and_sink(clock, Arc::new(StderrSink))
    }

    /// Create an engine on the given clock and diagnostic sink.
    #[must_use]
    pub fn with_clock_and_sink(clock: C, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { clock, sink }
    }

    /// Run one simulated request to completion.
    ///
    /// Suspends for the duration the configuration calls for, then returns
    /// the outcome carrying the run's log record:
    ///
    /// - injection off: 500ms delay, then `Success` with the full catalog
    ///   and a `200` log;
    /// - timeout injection: 3000ms delay, then `Failure` with
    ///   [`SimulationError::Timeout`];
    /// - 503 injection: 800ms delay, then `Failure` with
    ///   [`SimulationError::ServiceUnavailable`].
    ///
    /// No retries are attempted and no other failure modes exist. Once
    /// started, a run always completes after its delay elapses.
    pub async fn run(&self, config: RequestConfig) -> SimulationOutcome {
        let started_ms = self.clock.now_ms();

        if !config.inject_failure {
            return self.succeed(started_ms).await;
        }
        match config.failure_mode {
            FailureMode::Timeout => {
                self.fail(started_ms, TIMEOUT_DELAY_MS, SimulationError::Timeout)
                    .await
            }
            FailureMode::ServiceUnavailable => {
                self.fail(
                    started_ms,
                    SERVICE_UNAVAILABLE_DELAY_MS,
                    SimulationError::ServiceUnavailable,
                )
                .await
            }
        }
    }

    /// Happy path: normal round trip, full catalog.
    async fn succeed(&self, started_ms: u64) -> SimulationOutcome {
        self.clock.wait(SUCCESS_DELAY_MS).await;

        let log = self.build_log(started_ms, StatusOrReason::Status(SUCCESS_STATUS), None);
        self.emit(&log);

        SimulationOutcome::Success {
            products: catalog::products().to_vec(),
            log,
        }
    }

    /// Injected failure: delay, then the typed error.
    async fn fail(
        &self,
        started_ms: u64,
        delay_ms: u64,
        error: SimulationError,
    ) -> SimulationOutcome {
        self.clock.wait(delay_ms).await;

        let log = self.build_log(
            started_ms,
            StatusOrReason::Reason(error.reason().to_owned()),
            Some(error.error_code()),
        );
        self.emit(&log);

        SimulationOutcome::Failure { error, log }
    }

    fn build_log(
        &self,
        started_ms: u64,
        status_or_reason: StatusOrReason,
        error_code: Option<ErrorCode>,
    ) -> LogRecord {
        LogRecord::build(
            self.clock.now_ms(),
            REQUEST_URL,
            REQUEST_METHOD,
            started_ms,
            status_or_reason,
            error_code,
        )
    }

    fn emit(&self, log: &LogRecord) {
        self.sink.emit(&format!("{SIMLOG_PREFIX}{}", log.to_json_line()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::MemorySink;
    use crate::simulation::SimulatedClock;

    fn test_engine() -> (SimulationEngine<SimulatedClock>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
        let engine = SimulationEngine::with_clock_and_sink(
            SimulatedClock::default_start(),
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );
        (engine, sink)
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to create runtime");
        runtime.block_on(future)
    }

    #[test]
    fn test_happy_path_returns_full_catalog() {
        let (engine, sink) = test_engine();

        let outcome = block_on(engine.run(RequestConfig::happy_path()));

        let SimulationOutcome::Success { products, log } = outcome else {
            panic!("expected success");
        };
        assert_eq!(products, catalog::products().to_vec());
        assert_eq!(log.status_or_reason, StatusOrReason::Status(200));
        assert_eq!(log.error_code, None);
        assert_eq!(log.latency_ms, SUCCESS_DELAY_MS);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_timeout_injection() {
        let (engine, sink) = test_engine();

        let outcome = block_on(engine.run(RequestConfig::with_failure(FailureMode::Timeout)));

        let SimulationOutcome::Failure { error, log } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(error, SimulationError::Timeout);
        assert_eq!(
            log.status_or_reason,
            StatusOrReason::Reason("Request timeout after 3000ms".to_owned())
        );
        assert_eq!(log.error_code, Some(ErrorCode::NetTimeout));
        assert_eq!(log.latency_ms, TIMEOUT_DELAY_MS);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_service_unavailable_injection() {
        let (engine, sink) = test_engine();

        let outcome = block_on(engine.run(RequestConfig::with_failure(
            FailureMode::ServiceUnavailable,
        )));

        let SimulationOutcome::Failure { error, log } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(error, SimulationError::ServiceUnavailable);
        assert_eq!(
            log.status_or_reason,
            StatusOrReason::Reason("503 Service Unavailable".to_owned())
        );
        assert_eq!(log.error_code, Some(ErrorCode::Net503));
        assert_eq!(log.latency_ms, SERVICE_UNAVAILABLE_DELAY_MS);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_one_diagnostic_line_per_run_regardless_of_outcome() {
        let (engine, sink) = test_engine();

        block_on(async {
            let _success = engine.run(RequestConfig::happy_path()).await;
            let _timeout = engine
                .run(RequestConfig::with_failure(FailureMode::Timeout))
                .await;
            let _unavailable = engine
                .run(RequestConfig::with_failure(FailureMode::ServiceUnavailable))
                .await;
        });

        assert_eq!(sink.len(), 3);
        for line in sink.lines() {
            assert!(line.starts_with(SIMLOG_PREFIX));
        }
    }

    #[test]
    fn test_error_code_none_iff_success() {
        let (engine, _sink) = test_engine();

        let success = block_on(engine.run(RequestConfig::happy_path()));
        assert!(success.is_success());
        assert_eq!(success.log().error_code, None);

        let failure = block_on(engine.run(RequestConfig::with_failure(FailureMode::Timeout)));
        assert!(!failure.is_success());
        assert!(failure.log().error_code.is_some());
    }

    #[test]
    fn test_latency_reflects_clock_not_constant() {
        // A clock nudged mid-run must show up in the measured latency.
        let sink = Arc::new(MemorySink::new());
        let clock = SimulatedClock::default_start();
        clock.advance(1_234);
        #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
        let engine = SimulationEngine::with_clock_and_sink(
            clock,
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );

        let outcome = block_on(engine.run(RequestConfig::happy_path()));

        // SimulatedClock advances wait() by exactly the requested duration.
        assert_eq!(outcome.log().latency_ms, SUCCESS_DELAY_MS);
    }
}
