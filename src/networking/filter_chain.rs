//! Filter chains handed to plugins while an inbound listener is assembled.

use crate::xds::filters::http::{build_http_filters, HttpFilterConfigEntry};
use envoy_types::pb::envoy::config::listener::v3::Listener;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpFilter;
use serde::{Deserialize, Serialize};

/// Protocol a filter chain was classified as by the listener builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerProtocol {
    #[default]
    Unknown,
    Tcp,
    Http,
    /// Protocol sniffed at connection time
    Auto,
}

/// A filter chain under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChain {
    #[serde(default)]
    pub listener_protocol: ListenerProtocol,
    /// HTTP filters in processing order, router excluded
    #[serde(default)]
    pub http_filters: Vec<HttpFilterConfigEntry>,
}

impl FilterChain {
    pub fn new(listener_protocol: ListenerProtocol) -> Self {
        Self { listener_protocol, http_filters: Vec::new() }
    }

    pub fn is_http(&self) -> bool {
        self.listener_protocol == ListenerProtocol::Http
    }

    /// Serialize the chain's HTTP filters for the connection manager, router last.
    ///
    /// Non-HTTP chains have no connection manager and yield an empty list.
    pub fn build_http_filters(&self) -> crate::Result<Vec<HttpFilter>> {
        if !self.is_http() {
            return Ok(Vec::new());
        }
        build_http_filters(&self.http_filters)
    }
}

/// Objects plugins may mutate for a single listener.
///
/// `filter_chains[i]` describes `listener.filter_chains[i]`.
#[derive(Debug, Clone, Default)]
pub struct MutableObjects {
    pub listener: Option<Listener>,
    pub filter_chains: Vec<FilterChain>,
}

impl MutableObjects {
    pub fn new(listener: Listener, filter_chains: Vec<FilterChain>) -> Self {
        Self { listener: Some(listener), filter_chains }
    }

    /// Listener name, empty when no listener is attached
    pub fn listener_name(&self) -> &str {
        self.listener.as_ref().map(|l| l.name.as_str()).unwrap_or_default()
    }
}
