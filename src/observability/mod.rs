//! # Observability Infrastructure
//!
//! Structured logging for the plugin and its host binary.

pub mod logging;

pub use logging::{init_logging, log_config_info};
