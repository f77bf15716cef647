//! Test an injected 503: the run fails after the short delay with the
//! matching message, reason, and error code.

use crate::e2e_tests::helpers::*;
use crate::types::{ErrorCode, FailureMode, SimulationOutcome, StatusOrReason};

#[test]
fn test_service_unavailable_failure_fields() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::ServiceUnavailable);

    test.fire();

    let SimulationOutcome::Failure { error, log } = test.last_outcome() else {
        panic!("expected failure");
    };
    assert_eq!(
        error.to_string(),
        "Network failure: 503 Service Unavailable"
    );
    assert_eq!(
        log.status_or_reason,
        StatusOrReason::Reason("503 Service Unavailable".to_owned())
    );
    assert_eq!(log.error_code, Some(ErrorCode::Net503));
    assert!(log.latency_ms >= 800);
}

#[test]
fn test_service_unavailable_elapses_short_delay() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::ServiceUnavailable);
    let started = test.clock.current();

    test.fire();

    assert_eq!(test.clock.current(), started + 800);
}
