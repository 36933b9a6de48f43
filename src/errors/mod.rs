//! # Error Handling
//!
//! Error handling for the sidecar health-check plugin. The only domain error
//! is a missing listener; everything else comes from the ambient stack
//! (configuration loading, scenario parsing, wire conversion).

mod types;

pub use types::{HealthPluginError, Result};

/// Crate-wide error alias
pub type Error = HealthPluginError;
