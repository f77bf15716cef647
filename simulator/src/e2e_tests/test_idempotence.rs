//! Test that two sequential runs with identical config produce log records
//! differing only in timestamp and latency.

use crate::e2e_tests::helpers::*;
use crate::types::FailureMode;

#[test]
fn test_repeat_happy_path_runs_differ_only_in_timing() {
    let mut test = TestSession::new();

    test.fire();
    let first = test.last_log();

    // Idle time passes between the two triggers.
    test.clock.advance(10_000);
    test.fire();
    let second = test.last_log();

    assert_ne!(first.timestamp, second.timestamp);
    assert_eq!(first.url, second.url);
    assert_eq!(first.method, second.method);
    assert_eq!(first.status_or_reason, second.status_or_reason);
    assert_eq!(first.error_code, second.error_code);
    assert_eq!(first.latency_ms, second.latency_ms);
}

#[test]
fn test_repeat_failure_runs_are_identical_apart_from_timestamp() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::ServiceUnavailable);

    test.fire();
    let first = test.last_log();

    test.clock.advance(1);
    test.fire();
    let second = test.last_log();

    assert_ne!(first.timestamp, second.timestamp);
    assert_eq!(first.status_or_reason, second.status_or_reason);
    assert_eq!(first.error_code, second.error_code);
    assert_eq!(first.latency_ms, second.latency_ms);
}

#[test]
fn test_one_log_record_per_run() {
    let mut test = TestSession::new();

    test.fire();
    test.fire();
    test.fire();

    let logs = test
        .events()
        .iter()
        .filter(|event| matches!(event, Event::Log(_)))
        .count();
    assert_eq!(logs, 3);
    assert_eq!(test.simlog_lines().len(), 3);
}
