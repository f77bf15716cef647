//! Structured audit record for one simulated request/response cycle.
//!
//! Exactly one `LogRecord` is produced per simulation run, success or
//! failure. The JSON serialization is part of the protocol: keys appear in
//! camelCase and in the fixed order `timestamp, url, method, latencyMs,
//! statusOrReason, errorCode`, and `errorCode` is serialized as `null` on
//! success rather than omitted.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

/// HTTP status code or a human-readable reason for the outcome.
///
/// Successful runs record the numeric status (200); injected failures record
/// a reason string describing the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusOrReason {
    /// Numeric HTTP status.
    Status(u16),
    /// Failure reason, e.g. `"Request timeout after 3000ms"`.
    Reason(String),
}

/// Machine-readable code of an injected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The simulated request exceeded its timeout threshold.
    #[serde(rename = "NET_TIMEOUT")]
    NetTimeout,
    /// The simulated service answered 503.
    #[serde(rename = "NET_503")]
    Net503,
}

impl ErrorCode {
    /// The wire representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetTimeout => "NET_TIMEOUT",
            Self::Net503 => "NET_503",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry for one simulated request.
///
/// Field declaration order is load-bearing: serde serializes fields in this
/// order, which is the key order required of diagnostic output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// ISO-8601 timestamp (millisecond precision, UTC) of record creation.
    pub timestamp: String,
    /// Request target. A fixed label, never dereferenced.
    pub url: String,
    /// Request method. A fixed label, never dereferenced.
    pub method: String,
    /// Measured wall-clock time from invocation start to record creation.
    pub latency_ms: u64,
    /// Status code on success, reason string on failure.
    pub status_or_reason: StatusOrReason,
    /// Failure code, `None` exactly when the run succeeded.
    pub error_code: Option<ErrorCode>,
}

impl LogRecord {
    /// Build a record for a run that started at `started_ms` and completed at
    /// `now_ms` (both milliseconds since Unix epoch).
    ///
    /// Pure value construction: stamps `now_ms` as an ISO-8601 timestamp and
    /// computes the measured latency. Emitting or displaying the record is
    /// the caller's responsibility.
    #[must_use]
    pub fn build(
        now_ms: u64,
        url: &str,
        method: &str,
        started_ms: u64,
        status_or_reason: StatusOrReason,
        error_code: Option<ErrorCode>,
    ) -> Self {
        Self {
            timestamp: iso8601_millis(now_ms),
            url: url.to_owned(),
            method: method.to_owned(),
            latency_ms: now_ms.saturating_sub(started_ms),
            status_or_reason,
            error_code,
        }
    }

    /// Compact single-line JSON form, as emitted in diagnostic output.
    #[must_use]
    pub fn to_json_line(&self) -> String {
        #[allow(clippy::expect_used)] // Plain strings and integers; serialization cannot fail.
        serde_json::to_string(self).expect("log record serializes to JSON")
    }

    /// Pretty-printed JSON form (two-space indent), as displayed to the user.
    #[must_use]
    pub fn pretty(&self) -> String {
        #[allow(clippy::expect_used)] // Plain strings and integers; serialization cannot fail.
        serde_json::to_string_pretty(self).expect("log record serializes to JSON")
    }
}

/// Render milliseconds since Unix epoch as an ISO-8601 string with
/// millisecond precision and a `Z` suffix, e.g. `2023-11-14T22:13:20.000Z`.
fn iso8601_millis(epoch_ms: u64) -> String {
    #[allow(clippy::cast_possible_wrap)] // Epoch millis fit in i64 for ~292 million years.
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
