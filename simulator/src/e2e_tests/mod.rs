//! End-to-end tests at the session/renderer level.
//!
//! Each test file covers a specific scenario, driving a full session on
//! simulated time and asserting on the callbacks and diagnostic lines it
//! produces.

#![cfg(test)]

mod helpers;

mod test_busy_lifecycle;
mod test_happy_path;
mod test_idempotence;
mod test_service_unavailable;
mod test_simlog_line;
mod test_timeout_injection;
