// src/lib.rs
pub mod config;
pub mod error;
pub mod fetch;
pub mod health;
pub mod logging;
pub mod output;
pub mod retry;
pub mod system;
