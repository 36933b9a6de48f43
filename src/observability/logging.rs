//! # Structured Logging
//!
//! Structured logging setup and span macros using the tracing ecosystem.

use crate::config::ObservabilityConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Create a tracing span for a plugin hook invocation.
///
/// ```rust,ignore
/// let span = plugin_span!("health", "on_inbound_listener", proxy.id);
/// ```
#[macro_export]
macro_rules! plugin_span {
    ($plugin:expr, $hook:expr, $proxy_id:expr) => {
        tracing::info_span!(
            "plugin_hook",
            plugin = %$plugin,
            hook = %$hook,
            proxy_id = %$proxy_id
        )
    };
    ($plugin:expr, $hook:expr, $proxy_id:expr, $($field:tt)*) => {
        tracing::info_span!(
            "plugin_hook",
            plugin = %$plugin,
            hook = %$hook,
            proxy_id = %$proxy_id,
            $($field)*
        )
    };
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false` if a
/// subscriber was already installed (e.g. by a test harness).
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let default_level = config.env_filter_directive().unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = if config.json_logging {
        tracing::subscriber::set_global_default(
            fmt().json().with_env_filter(filter).with_current_span(true).finish(),
        )
        .is_ok()
    } else {
        tracing::subscriber::set_global_default(fmt().with_env_filter(filter).finish()).is_ok()
    };

    if installed {
        log_config_info(config);
    }

    installed
}

/// Log configuration at startup
pub fn log_config_info(config: &ObservabilityConfig) {
    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json_logging = %config.json_logging,
        "Sidecar health-check plugin configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_compile() {
        let _span = plugin_span!("health", "on_inbound_listener", "sidecar~10.0.0.1");
        let _span = plugin_span!("health", "on_inbound_listener", "sidecar~10.0.0.1", chains = 2);
    }

    #[test]
    fn test_log_config_info() {
        // No subscriber needed; must not panic
        log_config_info(&ObservabilityConfig::default());
    }
}
