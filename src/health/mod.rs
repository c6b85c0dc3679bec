// src/health/mod.rs
mod checker;
mod report;
mod status;

pub use checker::{EndpointChecker, BANNER_RULE};
pub use report::{CheckOutcome, EndpointResult, HealthReport, UP_MESSAGE};
pub use status::HealthStatus;
