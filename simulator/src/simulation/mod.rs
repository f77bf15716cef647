//! Deterministic Simulation Testing (DST) infrastructure.
//!
//! This module provides tools for testing the simulator with:
//! - Controlled time (no real system time, no real waiting)
//! - Reproducible random request-config generation
//! - Invariant checking after each run
//!
//! # Design Principles
//!
//! Following patterns from `TigerBeetle` and `Turso`:
//! 1. All asynchrony is abstracted and can be simulated
//! 2. All randomness is seeded for reproducibility
//! 3. Time is controlled, not real
//! 4. Given the same seed, execution is identical
//!
//! # Usage
//!
//! ```
//! use simulator::simulation::{Harness, HarnessConfig};
//!
//! let config = HarnessConfig::new(12345) // seed
//!     .with_failure_rate(0.5);
//!
//! let mut harness = Harness::new(config);
//! let report = harness.run(100); // Run 100 simulated requests
//!
//! assert!(report.passed());
//! ```

mod clock;
mod config_gen;
mod harness;
mod invariants;

pub use clock::SimulatedClock;
pub use config_gen::ConfigGenerator;
pub use harness::{Harness, HarnessConfig, HarnessReport};
pub use invariants::{InvariantChecker, InvariantViolation, RunHistory, RunRecord};
