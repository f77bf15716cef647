//! Fixed values of the simulation protocol.
//!
//! The delays model three network conditions: a normal round trip, a request
//! that exceeds a timeout threshold, and a service that answers quickly with
//! an error. Latency in log records is always measured, never copied from
//! these constants.

/// Simulated round-trip delay for a successful fetch, in milliseconds.
pub const SUCCESS_DELAY_MS: u64 = 500;

/// Simulated delay before a request is considered timed out, in milliseconds.
pub const TIMEOUT_DELAY_MS: u64 = 3000;

/// Simulated delay before the service answers 503, in milliseconds.
pub const SERVICE_UNAVAILABLE_DELAY_MS: u64 = 800;

/// Status recorded for a successful run.
pub const SUCCESS_STATUS: u16 = 200;

/// Request target recorded in log records. Never dereferenced.
pub const REQUEST_URL: &str = "/api/products";

/// Request method recorded in log records. Never dereferenced.
pub const REQUEST_METHOD: &str = "GET";

/// Prefix of every diagnostic line emitted for a completed run.
pub const SIMLOG_PREFIX: &str = "SIMLOG: ";

/// Number of products in the static catalog.
pub const CATALOG_SIZE: usize = 6;
