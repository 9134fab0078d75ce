//! Structured logging and observability
//!
//! Console logging is always enabled; rolling JSON file output is opt-in
//! via [`LoggingConfig`].
//!
//! [`LoggingConfig`]: crate::config::LoggingConfig

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
