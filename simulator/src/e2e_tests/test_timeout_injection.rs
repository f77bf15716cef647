//! Test an injected timeout: the run fails after the timeout delay with the
//! matching message, reason, and error code.

use crate::e2e_tests::helpers::*;
use crate::types::{ErrorCode, FailureMode, SimulationOutcome, StatusOrReason};

#[test]
fn test_timeout_failure_fields() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::Timeout);

    test.fire();

    let SimulationOutcome::Failure { error, log } = test.last_outcome() else {
        panic!("expected failure");
    };
    assert_eq!(error.to_string(), "Network failure: request timed out");
    assert_eq!(
        log.status_or_reason,
        StatusOrReason::Reason("Request timeout after 3000ms".to_owned())
    );
    assert_eq!(log.error_code, Some(ErrorCode::NetTimeout));
    assert!(log.latency_ms >= 3000);
}

#[test]
fn test_timeout_elapses_full_delay() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::Timeout);
    let started = test.clock.current();

    test.fire();

    assert_eq!(test.clock.current(), started + 3000);
}
