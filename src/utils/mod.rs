//! Shared utilities
//!
//! Logging setup and request timing.

mod logger;
mod timer;

pub use logger::{init_logger, LogLevel};
pub use timer::Timer;
