//! HTTP filter descriptors and builders
//!
//! This module defines the configuration model for the Envoy HTTP filters a
//! filter chain carries while plugins run, and the conversion of those
//! descriptors into protobuf `HttpFilter` messages once the chain is final.

pub mod health_check;

use crate::xds::filters::http::health_check::{HealthCheckConfig, HEALTH_CHECK_FILTER_NAME};
use crate::xds::filters::{any_from_message, invalid_config, TypedConfig};
use envoy_types::pb::envoy::extensions::filters::http::router::v3::Router as RouterFilter;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_filter::ConfigType as HttpFilterConfigType;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpFilter;
use envoy_types::pb::google::protobuf::Any as EnvoyAny;
use serde::{Deserialize, Serialize};

/// Envoy's canonical router filter name
pub const ROUTER_FILTER_NAME: &str = "envoy.filters.http.router";
const ROUTER_TYPE_URL: &str = "type.googleapis.com/envoy.extensions.filters.http.router.v3.Router";

/// An HTTP filter entry of a filter chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpFilterConfigEntry {
    /// Optional override for the filter name used in Envoy configuration
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the filter should be marked optional in Envoy
    #[serde(default)]
    pub is_optional: bool,
    /// Whether the filter should be disabled
    #[serde(default)]
    pub disabled: bool,
    /// Filter type and configuration
    pub filter: HttpFilterKind,
}

/// Supported HTTP filter types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HttpFilterKind {
    /// Built-in Envoy router filter
    Router,
    /// Envoy Health Check filter
    HealthCheck(HealthCheckConfig),
    /// Arbitrary filter expressed as a typed config payload
    Custom {
        #[serde(flatten)]
        config: TypedConfig,
    },
}

impl HttpFilterKind {
    fn is_router(&self) -> bool {
        matches!(self, Self::Router)
    }

    fn default_name(&self) -> &'static str {
        match self {
            Self::Router => ROUTER_FILTER_NAME,
            Self::HealthCheck(_) => HEALTH_CHECK_FILTER_NAME,
            Self::Custom { .. } => "custom.http.filter",
        }
    }

    fn to_any(&self) -> EnvoyAny {
        match self {
            Self::Router => any_from_message(ROUTER_TYPE_URL, &RouterFilter::default()),
            Self::HealthCheck(cfg) => cfg.to_any(),
            Self::Custom { config } => config.to_any(),
        }
    }
}

impl HttpFilterConfigEntry {
    /// Entry with the kind's default name and default flags
    pub fn new(filter: HttpFilterKind) -> Self {
        Self { name: None, is_optional: false, disabled: false, filter }
    }

    /// Name the filter is emitted under
    pub fn resolved_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.filter.default_name())
    }

    /// Health check configuration carried by this entry, if any.
    ///
    /// Custom entries count when their payload is byte-identical to what
    /// [`HealthCheckConfig::to_any`] produces, so a filter placed by another
    /// stage in encoded form is recognised as the same filter.
    pub fn health_check_config(&self) -> Option<HealthCheckConfig> {
        match &self.filter {
            HttpFilterKind::HealthCheck(cfg) => Some(cfg.clone()),
            HttpFilterKind::Custom { config } => {
                HealthCheckConfig::from_canonical_any(&config.to_any())
            }
            HttpFilterKind::Router => None,
        }
    }

    /// Convert to the Envoy protobuf filter
    pub fn to_http_filter(&self) -> HttpFilter {
        HttpFilter {
            name: self.resolved_name().to_string(),
            is_optional: self.is_optional,
            disabled: self.disabled,
            config_type: Some(HttpFilterConfigType::TypedConfig(self.filter.to_any())),
        }
    }

    /// Build an entry from an Envoy protobuf filter
    pub fn from_http_filter(filter: &HttpFilter) -> Result<Self, crate::Error> {
        let kind = match &filter.config_type {
            Some(HttpFilterConfigType::TypedConfig(any)) => {
                HttpFilterKind::Custom { config: TypedConfig::from_any(any) }
            }
            None if filter.name == ROUTER_FILTER_NAME => HttpFilterKind::Router,
            _ => {
                return Err(invalid_config(format!(
                    "HTTP filter '{}' has no typed config",
                    filter.name
                )))
            }
        };

        Ok(Self {
            name: Some(filter.name.clone()),
            is_optional: filter.is_optional,
            disabled: filter.disabled,
            filter: kind,
        })
    }
}

/// Build ordered Envoy HTTP filter list and ensure router filter is last.
pub fn build_http_filters(
    entries: &[HttpFilterConfigEntry],
) -> Result<Vec<HttpFilter>, crate::Error> {
    let mut filters = Vec::with_capacity(entries.len() + 1);
    let mut router_filter: Option<HttpFilter> = None;

    for entry in entries {
        let filter = entry.to_http_filter();

        if entry.filter.is_router() || filter.name == ROUTER_FILTER_NAME {
            if router_filter.is_some() {
                return Err(invalid_config("Multiple router filters specified"));
            }
            router_filter = Some(filter);
        } else {
            filters.push(filter);
        }
    }

    // Append router filter, using default if none provided
    filters.push(router_filter.unwrap_or_else(default_router_filter));

    Ok(filters)
}

fn default_router_filter() -> HttpFilter {
    HttpFilterConfigEntry::new(HttpFilterKind::Router).to_http_filter()
}
