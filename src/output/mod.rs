//! Output formatting module
//!
//! Renders the end-of-run summary in table, JSON or one-line form.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
