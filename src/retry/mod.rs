// src/retry/mod.rs
mod sleeper;
mod strategy;

pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
pub use strategy::{AttemptState, RetryStrategy};
