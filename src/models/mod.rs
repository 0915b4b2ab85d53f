//! Data models for API smoke testing
//!
//! This module contains all data structures used throughout the application.

mod report;
mod test_result;

pub use report::ResultsReport;
pub use test_result::{TestCase, TestResult};
