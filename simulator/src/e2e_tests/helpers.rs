//! Common helpers for end-to-end tests.

use std::sync::{Arc, Mutex};

use crate::diag::{DiagnosticSink, MemorySink};
use crate::engine::SimulationEngine;
use crate::render::Renderer;
use crate::session::Session;
use crate::simulation::SimulatedClock;
use crate::types::{FailureMode, LogRecord, SimulationOutcome};

/// One observed presentation callback, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `on_busy_state_change(is_busy)`.
    Busy(bool),
    /// `on_log(log)`.
    Log(LogRecord),
    /// `on_outcome(outcome)`.
    Outcome(SimulationOutcome),
}

/// Renderer that records every callback instead of printing.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingRenderer {
    fn record(&self, event: Event) {
        #[allow(clippy::expect_used)]
        self.events.lock().expect("lock events").push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn on_busy_state_change(&self, is_busy: bool) {
        self.record(Event::Busy(is_busy));
    }

    fn on_log(&self, log: &LogRecord) {
        self.record(Event::Log(log.clone()));
    }

    fn on_outcome(&self, outcome: &SimulationOutcome) {
        self.record(Event::Outcome(outcome.clone()));
    }
}

/// A full session on simulated time, with recorded callbacks and captured
/// diagnostic lines.
pub struct TestSession {
    pub session: Session<SimulatedClock, RecordingRenderer>,
    pub clock: SimulatedClock,
    pub sink: Arc<MemorySink>,
    runtime: tokio::runtime::Runtime,
    events: Arc<Mutex<Vec<Event>>>,
}

impl TestSession {
    /// Create a fresh session with injection off.
    #[must_use]
    pub fn new() -> Self {
        let clock = SimulatedClock::default_start();
        let sink = Arc::new(MemorySink::new());
        let renderer = RecordingRenderer::default();
        #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
        let events = Arc::clone(&renderer.events);

        #[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
        let engine = SimulationEngine::with_clock_and_sink(
            clock.clone(),
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );
        let session = Session::new(engine, renderer, false, FailureMode::Timeout);

        #[allow(clippy::expect_used)]
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to create runtime");

        Self {
            session,
            clock,
            sink,
            runtime,
            events,
        }
    }

    /// Fire the trigger and run the simulation to completion.
    pub fn fire(&mut self) {
        self.runtime.block_on(self.session.fire());
    }

    /// All callbacks observed so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        #[allow(clippy::expect_used)]
        self.events.lock().expect("lock events").clone()
    }

    /// All diagnostic lines emitted so far, in order.
    #[must_use]
    pub fn simlog_lines(&self) -> Vec<String> {
        self.sink.lines()
    }

    /// The outcome of the most recent run.
    ///
    /// # Panics
    ///
    /// Panics if no run has completed yet.
    #[must_use]
    pub fn last_outcome(&self) -> SimulationOutcome {
        self.events()
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Outcome(outcome) => Some(outcome.clone()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no run has completed"))
    }

    /// The log record of the most recent run.
    ///
    /// # Panics
    ///
    /// Panics if no run has completed yet.
    #[must_use]
    pub fn last_log(&self) -> LogRecord {
        self.last_outcome().log().clone()
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
