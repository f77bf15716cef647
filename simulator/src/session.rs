//! Session state and the run trigger.
//!
//! A session owns the engine, the renderer, and the failure-injection toggle
//! state that the trigger snapshots into a fresh [`RequestConfig`] per run.
//! Runs are serialized by construction: [`Session::fire`] takes `&mut self`,
//! so a second run cannot start while one is pending.

use crate::clock::Clock;
use crate::engine::SimulationEngine;
use crate::render::Renderer;
use crate::types::{FailureMode, RequestConfig};

/// One interactive simulation session.
pub struct Session<C: Clock, R: Renderer> {
    engine: SimulationEngine<C>,
    renderer: R,
    inject_failure: bool,
    failure_mode: FailureMode,
}

/// Re-enables the idle state when a run exits, normally or by panic.
///
/// The busy-off callback must always fire so the session returns to a
/// ready-to-run state after any outcome.
struct BusyGuard<'a, R: Renderer> {
    renderer: &'a R,
}

impl<R: Renderer> Drop for BusyGuard<'_, R> {
    fn drop(&mut self) {
        self.renderer.on_busy_state_change(false);
    }
}

impl<C: Clock, R: Renderer> Session<C, R> {
    /// Create a session with the given initial toggle state.
    #[must_use]
    pub const fn new(
        engine: SimulationEngine<C>,
        renderer: R,
        inject_failure: bool,
        failure_mode: FailureMode,
    ) -> Self {
        Self {
            engine,
            renderer,
            inject_failure,
            failure_mode,
        }
    }

    /// Enable or disable failure injection for subsequent runs.
    pub const fn set_inject_failure(&mut self, inject: bool) {
        self.inject_failure = inject;
    }

    /// Flip the failure-injection toggle, returning the new state.
    pub const fn toggle_inject_failure(&mut self) -> bool {
        self.inject_failure = !self.inject_failure;
        self.inject_failure
    }

    /// Select which failure to inject for subsequent runs.
    pub const fn set_failure_mode(&mut self, mode: FailureMode) {
        self.failure_mode = mode;
    }

    /// Whether failure injection is currently enabled.
    #[must_use]
    pub const fn inject_failure(&self) -> bool {
        self.inject_failure
    }

    /// The currently selected failure mode.
    #[must_use]
    pub const fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Snapshot the current toggle state as a fresh per-run config.
    #[must_use]
    pub const fn request_config(&self) -> RequestConfig {
        RequestConfig {
            inject_failure: self.inject_failure,
            failure_mode: self.failure_mode,
        }
    }

    /// The zero-argument trigger: run one simulation with the current state.
    ///
    /// Callback order: busy on, the audit record, the outcome, busy off. The
    /// busy-off callback fires unconditionally on exit, so the session is
    /// idle and reusable after every run.
    pub async fn fire(&mut self) {
        let config = self.request_config();

        self.renderer.on_busy_state_change(true);
        let guard = BusyGuard {
            renderer: &self.renderer,
        };

        let outcome = self.engine.run(config).await;
        self.renderer.on_log(outcome.log());
        self.renderer.on_outcome(&outcome);

        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::diag::MemorySink;
    use crate::simulation::SimulatedClock;

    #[derive(Default)]
    struct BusyRecorder {
        states: Arc<Mutex<Vec<bool>>>,
    }

    impl Renderer for BusyRecorder {
        fn on_busy_state_change(&self, is_busy: bool) {
            if let Ok(mut states) = self.states.lock() {
                states.push(is_busy);
            }
        }

        fn on_log(&self, _log: &crate::types::LogRecord) {}

        fn on_outcome(&self, _outcome: &crate::types::SimulationOutcome) {}
    }

    fn test_session(renderer: BusyRecorder) -> Session<SimulatedClock, BusyRecorder> {
        let engine = SimulationEngine::with_clock_and_sink(
            SimulatedClock::default_start(),
            Arc::new(MemorySink::new()),
        );
        Session::new(engine, renderer, false, FailureMode::Timeout)
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut session = test_session(BusyRecorder::default());

        assert!(!session.inject_failure());
        assert!(session.toggle_inject_failure());
        assert!(!session.toggle_inject_failure());
    }

    #[test]
    fn test_request_config_snapshots_current_state() {
        let mut session = test_session(BusyRecorder::default());

        session.set_inject_failure(true);
        session.set_failure_mode(FailureMode::ServiceUnavailable);

        assert_eq!(
            session.request_config(),
            RequestConfig::with_failure(FailureMode::ServiceUnavailable)
        );
    }

    #[test]
    fn test_fire_brackets_run_with_busy_callbacks() {
        let renderer = BusyRecorder::default();
        let states = Arc::clone(&renderer.states);
        let mut session = test_session(renderer);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to create runtime");
        runtime.block_on(session.fire());
        runtime.block_on(session.fire());

        let recorded = states.lock().expect("lock states").clone();
        assert_eq!(recorded, vec![true, false, true, false]);
    }
}
