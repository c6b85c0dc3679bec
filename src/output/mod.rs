// src/output/mod.rs
mod render;
mod store;

pub use render::render;
pub use store::{ReportStore, RESULTS_FILE_NAME};
