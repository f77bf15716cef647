//! Test a run with failure injection off: the full catalog comes back with
//! a clean log record.

use crate::catalog;
use crate::e2e_tests::helpers::*;
use crate::types::{SimulationOutcome, StatusOrReason};

#[test]
fn test_happy_path_returns_six_products() {
    let mut test = TestSession::new();

    test.fire();

    let SimulationOutcome::Success { products, .. } = test.last_outcome() else {
        panic!("expected success");
    };
    assert_eq!(products.len(), 6);
    assert_eq!(products, catalog::products().to_vec());
}

#[test]
fn test_happy_path_log_record() {
    let mut test = TestSession::new();
    let started = test.clock.current();

    test.fire();

    let log = test.last_log();
    assert_eq!(log.status_or_reason, StatusOrReason::Status(200));
    assert_eq!(log.error_code, None);
    assert_eq!(log.url, "/api/products");
    assert_eq!(log.method, "GET");
    assert!(log.latency_ms >= 500);
    assert_eq!(test.clock.current(), started + 500);
}
