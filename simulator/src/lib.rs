// Life of a run:
// 1. The trigger snapshots the toggle state into a RequestConfig
// 2. The engine records the start time and suspends for the configured delay
// 3. One LogRecord is built from measured elapsed time
// 4. One SIMLOG line goes to the diagnostic sink
// 5. The outcome (catalog on success, typed error on failure) goes back to
//    the renderer: busy on, log, outcome, busy off
//
// System components:
//  - Clock/delay primitive (the sole suspension point)
//  - Log builder
//  - Simulation engine
//  - Presentation adapter (renderer trait; terminal impl in the binary)

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods))]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod constants;
pub mod diag;
pub mod engine;
pub mod render;
pub mod session;
pub mod simulation;
pub mod types;

mod e2e_tests;

pub use engine::SimulationEngine;
pub use session::Session;
