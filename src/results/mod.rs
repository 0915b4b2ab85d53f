//! Results persistence
//!
//! Writes the run report to a flat JSON file and reads it back.

mod storage;

pub use storage::{load_report, save_report};
