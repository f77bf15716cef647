//! Test the callback order of a run and that the session is reusable after
//! any outcome.

use crate::e2e_tests::helpers::*;
use crate::types::FailureMode;

fn assert_run_callback_order(events: &[Event]) {
    assert_eq!(events.len(), 4, "{events:?}");
    assert_eq!(events[0], Event::Busy(true));
    assert!(matches!(events[1], Event::Log(_)));
    assert!(matches!(events[2], Event::Outcome(_)));
    assert_eq!(events[3], Event::Busy(false));
}

#[test]
fn test_success_run_callback_order() {
    let mut test = TestSession::new();

    test.fire();

    assert_run_callback_order(&test.events());
}

#[test]
fn test_failure_run_callback_order() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::Timeout);

    test.fire();

    assert_run_callback_order(&test.events());
}

#[test]
fn test_session_reusable_after_failure() {
    let mut test = TestSession::new();

    // A failed run must leave the session idle and ready for the next one.
    test.session.set_inject_failure(true);
    test.fire();
    assert!(!test.last_outcome().is_success());

    test.session.set_inject_failure(false);
    test.fire();
    assert!(test.last_outcome().is_success());

    let events = test.events();
    assert_run_callback_order(&events[..4]);
    assert_run_callback_order(&events[4..]);
}
