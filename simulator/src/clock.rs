//! Time and delay abstraction for deterministic simulation testing.
//!
//! This module provides a `Clock` trait that abstracts over the two time
//! operations the simulator needs: reading wall-clock time and suspending the
//! current task for a duration. Production code uses real system time and a
//! real timer; tests swap in a simulated clock that advances instantly.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Abstraction over time and delay operations.
///
/// This trait allows swapping between real time and simulated time for
/// deterministic testing. `wait` is the sole suspension point in the system:
/// it suspends the current logical task and resumes it exactly once, after at
/// least the requested duration. There is no cancellation and no early wake.
pub trait Clock {
    /// Get the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;

    /// Suspend the current task for at least `duration_ms` milliseconds.
    fn wait(&self, duration_ms: u64) -> impl Future<Output = ()>;
}

/// Real clock using system time and the tokio timer.
///
/// This is the default implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)] // Milliseconds won't overflow u64 for billions of years
    fn now_ms(&self) -> u64 {
        // SystemTime::now() can't fail on any supported platform.
        // duration_since(UNIX_EPOCH) only fails if system time is before 1970.
        #[allow(clippy::expect_used)]
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch");
        duration.as_millis() as u64
    }

    fn wait(&self, duration_ms: u64) -> impl Future<Output = ()> {
        tokio::time::sleep(Duration::from_millis(duration_ms))
    }
}
