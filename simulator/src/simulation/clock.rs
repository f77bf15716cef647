//! Simulated clock for deterministic testing.
//!
//! This module provides a controlled clock whose `wait` resolves instantly,
//! advancing simulated time by exactly the requested duration. Runs on it are
//! fully deterministic and take no real time.

use std::cell::Cell;
use std::rc::Rc;

use crate::clock::Clock;

/// A simulated clock for deterministic testing.
///
/// Unlike [`SystemClock`](crate::clock::SystemClock), this implementation
/// never touches the system clock or the timer. Time only advances when a
/// `wait` completes or when a test advances it explicitly.
///
/// # Thread Safety
///
/// Uses `Rc<Cell<_>>` internally, making it single-threaded only. For DST we
/// run everything on a single thread anyway, so this is fine.
///
/// # Sharing
///
/// `Clone` produces a handle onto the *same* underlying time, so a test can
/// keep one handle while the engine owns another and both observe the same
/// clock.
///
/// # Example
///
/// ```
/// use simulator::clock::Clock;
/// use simulator::simulation::SimulatedClock;
///
/// let clock = SimulatedClock::new(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 1100);
///
/// clock.set(5000);
/// assert_eq!(clock.now_ms(), 5000);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    /// Current simulated time in milliseconds since Unix epoch, shared
    /// between all handles cloned from the same clock.
    current_time_ms: Rc<Cell<u64>>,
}

impl SimulatedClock {
    /// Create a new simulated clock with the given initial time.
    ///
    /// # Arguments
    ///
    /// * `initial_time_ms` - The initial time in milliseconds since Unix
    ///   epoch. A reasonable default is around `1_700_000_000_000`
    ///   (late 2023).
    #[must_use]
    pub fn new(initial_time_ms: u64) -> Self {
        Self {
            current_time_ms: Rc::new(Cell::new(initial_time_ms)),
        }
    }

    /// Create a new simulated clock starting at a reasonable default time.
    ///
    /// Uses `1_700_000_000_000` (approximately November 2023) as the
    /// starting point.
    #[must_use]
    pub fn default_start() -> Self {
        Self::new(1_700_000_000_000)
    }

    /// Advance time by the given number of milliseconds.
    ///
    /// Time saturates at `u64::MAX` if overflow would occur.
    pub fn advance(&self, ms: u64) {
        let current = self.current_time_ms.get();
        self.current_time_ms.set(current.saturating_add(ms));
    }

    /// Set the current time to a specific value.
    ///
    /// Note: this can move time backwards, which makes measured latencies
    /// saturate to zero. Prefer `advance` for normal testing.
    pub fn set(&self, time_ms: u64) {
        self.current_time_ms.set(time_ms);
    }

    /// Get the current simulated time without advancing it.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current_time_ms.get()
    }
}

impl Clock for SimulatedClock {
    fn now_ms(&self) -> u64 {
        self.current_time_ms.get()
    }

    /// Resolve instantly, advancing simulated time by exactly `duration_ms`.
    ///
    /// The advance happens when the future is polled, not when it is created.
    fn wait(&self, duration_ms: u64) -> impl Future<Output = ()> {
        async move { self.advance(duration_ms) }
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::default_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock_initial() {
        let clock = SimulatedClock::new(1000);
        assert_eq!(clock.now_ms(), 1000);
        assert_eq!(clock.current(), 1000);
    }

    #[test]
    fn test_simulated_clock_advance() {
        let clock = SimulatedClock::new(1000);

        clock.advance(100);
        assert_eq!(clock.now_ms(), 1100);

        clock.advance(50);
        assert_eq!(clock.now_ms(), 1150);
    }

    #[test]
    fn test_simulated_clock_set() {
        let clock = SimulatedClock::new(1000);

        clock.set(5000);
        assert_eq!(clock.now_ms(), 5000);

        // Can go backwards (latency saturates to zero in that case)
        clock.set(3000);
        assert_eq!(clock.now_ms(), 3000);
    }

    #[test]
    fn test_simulated_clock_default() {
        let clock = SimulatedClock::default_start();
        assert_eq!(clock.now_ms(), 1_700_000_000_000);
    }

    #[test]
    fn test_simulated_clock_clones_share_time() {
        let clock = SimulatedClock::new(1000);
        let handle = clock.clone();

        clock.advance(500);

        assert_eq!(handle.now_ms(), 1500);
    }

    #[test]
    fn test_simulated_clock_wait_advances_exactly() {
        let clock = SimulatedClock::new(1000);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to create runtime");

        runtime.block_on(clock.wait(500));
        assert_eq!(clock.now_ms(), 1500);

        runtime.block_on(clock.wait(0));
        assert_eq!(clock.now_ms(), 1500);
    }

    #[test]
    fn test_simulated_clock_deterministic() {
        // Same starting conditions produce same results
        let clock1 = SimulatedClock::new(1000);
        let clock2 = SimulatedClock::new(1000);

        for _ in 0..100 {
            clock1.advance(1);
            clock2.advance(1);
        }

        assert_eq!(clock1.now_ms(), clock2.now_ms());
        assert_eq!(clock1.now_ms(), 1100);
    }
}
