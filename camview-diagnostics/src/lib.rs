//! # camview diagnostics
//!
//! Where binder diagnostics go, and how logging is set up.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod debug_logger;
pub mod sinks;

// Re-export main types
pub use debug_logger::{filter_directives, init_logging, log_filter};
pub use sinks::{JsonLineSink, TracingSink};
