//! # Configuration Management
//!
//! Layered configuration for the plugin host: built-in defaults, an optional
//! configuration file, then `SIDECAR_HEALTH__*` environment variables.

mod settings;

pub use settings::{AppConfig, ObservabilityConfig};

use crate::Result;
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SIDECAR_HEALTH";

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// Nested keys use `__` in environment variable names, e.g.
    /// `SIDECAR_HEALTH__OBSERVABILITY__LOG_LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&AppConfig::default())?;

        let mut builder = ::config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}
