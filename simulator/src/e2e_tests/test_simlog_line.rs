//! Test the diagnostic line: one per run, `SIMLOG: ` prefix, compact JSON
//! with the fixed key order.

use crate::e2e_tests::helpers::*;
use crate::types::{FailureMode, LogRecord};

#[test]
fn test_one_prefixed_line_per_run() {
    let mut test = TestSession::new();

    test.fire();
    test.session.set_inject_failure(true);
    test.fire();

    let lines = test.simlog_lines();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(line.starts_with("SIMLOG: "), "{line}");
    }
}

#[test]
fn test_line_parses_back_to_the_run_log() {
    let mut test = TestSession::new();

    test.fire();

    let lines = test.simlog_lines();
    let json = lines[0].strip_prefix("SIMLOG: ").expect("prefixed line");
    let parsed: LogRecord = serde_json::from_str(json).expect("line parses");
    assert_eq!(parsed, test.last_log());
}

#[test]
fn test_line_key_order() {
    let mut test = TestSession::new();
    test.session.set_inject_failure(true);
    test.session.set_failure_mode(FailureMode::ServiceUnavailable);

    test.fire();

    let lines = test.simlog_lines();
    let positions: Vec<usize> = [
        "\"timestamp\"",
        "\"url\"",
        "\"method\"",
        "\"latencyMs\"",
        "\"statusOrReason\"",
        "\"errorCode\"",
    ]
    .iter()
    .map(|key| lines[0].find(key).expect("key present"))
    .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_success_line_has_null_error_code() {
    let mut test = TestSession::new();

    test.fire();

    let lines = test.simlog_lines();
    assert!(lines[0].ends_with("\"errorCode\":null}"), "{}", lines[0]);
}
