//! # Configuration Settings
//!
//! Defines the configuration structure for the health-check plugin host.

use crate::errors::{HealthPluginError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Observability configuration
    #[validate(nested)]
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(HealthPluginError::from)?;

        self.validate_custom()?;

        Ok(())
    }

    fn validate_custom(&self) -> Result<()> {
        if self.observability.env_filter_directive().is_none() {
            return Err(HealthPluginError::validation_field(
                format!("Unknown log level '{}'", self.observability.log_level),
                "observability.log_level",
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "sidecar-health".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Normalized level directive for `EnvFilter`, `None` when the level is unknown
    pub fn env_filter_directive(&self) -> Option<&'static str> {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some("trace"),
            "debug" => Some("debug"),
            "info" => Some("info"),
            "warn" | "warning" => Some("warn"),
            "error" => Some("error"),
            "off" => Some("off"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_directive() {
        let mut config = ObservabilityConfig::default();
        assert_eq!(config.env_filter_directive(), Some("info"));

        config.log_level = "WARNING".into();
        assert_eq!(config.env_filter_directive(), Some("warn"));

        config.log_level = "chatty".into();
        assert_eq!(config.env_filter_directive(), None);
    }

    #[test]
    fn test_config_validation_errors() {
        let mut config = AppConfig::default();
        config.observability.service_name = String::new();
        let err = config.validate().expect_err("empty service name should fail");
        assert!(err.to_string().contains("Service name cannot be empty"));

        let mut config = AppConfig::default();
        config.observability.log_level = "loud".into();
        let err = config.validate().expect_err("unknown level should fail");
        assert!(err.to_string().contains("Unknown log level 'loud'"));
    }
}
