//! Scenario files: one inbound listener plus everything a push cycle would
//! hand the plugins for it.

use crate::model::{Proxy, PushContext, ServiceInstance};
use crate::networking::{FilterChain, InputParams, ListenerProtocol, MutableObjects, Plugin};
use crate::xds::filters::TypedConfig;
use crate::{Error, Result};
use envoy_types::pb::envoy::config::listener::v3::{
    FilterChain as ListenerFilterChain, Listener,
};
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_filter::ConfigType as HttpFilterConfigType;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inputs for rendering a single inbound listener
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub proxy: Option<Proxy>,
    #[serde(default)]
    pub service_instance: Option<ServiceInstance>,
    /// Workload probes keyed by workload IP
    #[serde(default)]
    pub probes: PushContext,
    #[serde(default)]
    pub listener: Option<ScenarioListener>,
}

/// Listener skeleton as produced by the listener builder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioListener {
    pub name: String,
    #[serde(default)]
    pub filter_chains: Vec<FilterChain>,
}

/// Filter chain after all plugins ran, in wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFilterChain {
    pub listener_protocol: ListenerProtocol,
    pub http_filters: Vec<RenderedHttpFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedHttpFilter {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_config: Option<TypedConfig>,
}

impl From<&HttpFilter> for RenderedHttpFilter {
    fn from(filter: &HttpFilter) -> Self {
        let typed_config = match &filter.config_type {
            Some(HttpFilterConfigType::TypedConfig(any)) => Some(TypedConfig::from_any(any)),
            _ => None,
        };

        Self {
            name: filter.name.clone(),
            is_optional: filter.is_optional,
            disabled: filter.disabled,
            typed_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedListener {
    pub name: String,
    pub filter_chains: Vec<RenderedFilterChain>,
}

impl Scenario {
    /// Load a scenario from a `.json` file, or YAML for any other extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, format!("Failed to read scenario '{}'", path.display())))?;

        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
        if is_json {
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(serde_yaml::from_str(&contents)?)
        }
    }

    /// Mutable objects as the listener builder would hand them to plugins
    pub fn mutable_objects(&self) -> MutableObjects {
        match &self.listener {
            Some(skeleton) => {
                let listener = Listener {
                    name: skeleton.name.clone(),
                    filter_chains: vec![
                        ListenerFilterChain::default();
                        skeleton.filter_chains.len()
                    ],
                    ..Default::default()
                };
                MutableObjects::new(listener, skeleton.filter_chains.clone())
            }
            None => MutableObjects::default(),
        }
    }

    /// Run `plugins` over the inbound listener and serialize the result
    pub fn render(&self, plugins: &[&dyn Plugin]) -> Result<RenderedListener> {
        let mut input = InputParams::new(&self.probes);
        input.node = self.proxy.as_ref();
        input.service_instance = self.service_instance.as_ref();

        let mut mutable = self.mutable_objects();
        for plugin in plugins {
            plugin.on_inbound_listener(&input, &mut mutable)?;
        }

        let filter_chains = mutable
            .filter_chains
            .iter()
            .map(|chain| {
                let http_filters = chain.build_http_filters()?;
                Ok(RenderedFilterChain {
                    listener_protocol: chain.listener_protocol,
                    http_filters: http_filters.iter().map(RenderedHttpFilter::from).collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RenderedListener { name: mutable.listener_name().to_string(), filter_chains })
    }
}
