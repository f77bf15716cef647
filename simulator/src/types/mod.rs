pub mod log_record;
pub mod outcome;
pub mod product;
pub mod request_config;

pub use log_record::{ErrorCode, LogRecord, StatusOrReason};
pub use outcome::{SimulationError, SimulationOutcome};
pub use product::Product;
pub use request_config::{FailureMode, RequestConfig};
