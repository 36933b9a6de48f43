//! Plugin contract between the configuration generator and its plugins.
//!
//! Hosts drive the full [`Plugin`] hook set. Plugins that only care about
//! inbound listeners implement [`InboundListenerMutator`] and get the rest of
//! the hooks as no-ops through the blanket adapter.

use super::filter_chain::{FilterChain, MutableObjects};
use crate::model::{ProbeSource, Proxy, ServiceInstance};
use crate::Result;
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::route::v3::RouteConfiguration;

/// Inputs for a single plugin invocation
#[derive(Clone, Copy)]
pub struct InputParams<'a> {
    /// Proxy being configured
    pub node: Option<&'a Proxy>,
    /// Service instance bound to the listener, if any
    pub service_instance: Option<&'a ServiceInstance>,
    /// Push-cycle view of workload probes
    pub push: &'a dyn ProbeSource,
}

impl<'a> InputParams<'a> {
    pub fn new(push: &'a dyn ProbeSource) -> Self {
        Self { node: None, service_instance: None, push }
    }

    pub fn with_node(mut self, node: &'a Proxy) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_service_instance(mut self, instance: &'a ServiceInstance) -> Self {
        self.service_instance = Some(instance);
        self
    }
}

impl std::fmt::Debug for InputParams<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputParams")
            .field("node", &self.node)
            .field("service_instance", &self.service_instance)
            .finish_non_exhaustive()
    }
}

/// Hooks the configuration generator calls on every registered plugin.
pub trait Plugin {
    /// Called for each outbound listener added to the LDS output
    fn on_outbound_listener(&self, input: &InputParams<'_>, mutable: &mut MutableObjects)
        -> Result<()>;

    /// Called for each inbound listener added to the LDS output
    fn on_inbound_listener(&self, input: &InputParams<'_>, mutable: &mut MutableObjects)
        -> Result<()>;

    fn on_virtual_listener(&self, input: &InputParams<'_>, mutable: &mut MutableObjects)
        -> Result<()>;

    fn on_inbound_cluster(&self, input: &InputParams<'_>, cluster: &mut Cluster);

    fn on_outbound_cluster(&self, input: &InputParams<'_>, cluster: &mut Cluster);

    fn on_inbound_route_configuration(
        &self,
        input: &InputParams<'_>,
        route: &mut RouteConfiguration,
    );

    fn on_outbound_route_configuration(
        &self,
        input: &InputParams<'_>,
        route: &mut RouteConfiguration,
    );

    /// Extra inbound filter chains contributed by the plugin
    fn on_inbound_filter_chains(&self, input: &InputParams<'_>) -> Vec<FilterChain>;

    /// Called when the inbound passthrough filter chain is added
    fn on_inbound_passthrough(
        &self,
        input: &InputParams<'_>,
        mutable: &mut MutableObjects,
    ) -> Result<()>;

    fn on_inbound_passthrough_filter_chains(&self, input: &InputParams<'_>) -> Vec<FilterChain>;
}

/// A plugin whose only behavior is mutating inbound listeners.
pub trait InboundListenerMutator {
    /// Short plugin name used in logs
    fn name(&self) -> &'static str;

    fn mutate_inbound_listener(
        &self,
        input: &InputParams<'_>,
        mutable: &mut MutableObjects,
    ) -> Result<()>;
}

impl<T: InboundListenerMutator> Plugin for T {
    fn on_outbound_listener(
        &self,
        _input: &InputParams<'_>,
        _mutable: &mut MutableObjects,
    ) -> Result<()> {
        Ok(())
    }

    fn on_inbound_listener(
        &self,
        input: &InputParams<'_>,
        mutable: &mut MutableObjects,
    ) -> Result<()> {
        self.mutate_inbound_listener(input, mutable)
    }

    fn on_virtual_listener(
        &self,
        _input: &InputParams<'_>,
        _mutable: &mut MutableObjects,
    ) -> Result<()> {
        Ok(())
    }

    fn on_inbound_cluster(&self, _input: &InputParams<'_>, _cluster: &mut Cluster) {}

    fn on_outbound_cluster(&self, _input: &InputParams<'_>, _cluster: &mut Cluster) {}

    fn on_inbound_route_configuration(
        &self,
        _input: &InputParams<'_>,
        _route: &mut RouteConfiguration,
    ) {
    }

    fn on_outbound_route_configuration(
        &self,
        _input: &InputParams<'_>,
        _route: &mut RouteConfiguration,
    ) {
    }

    fn on_inbound_filter_chains(&self, _input: &InputParams<'_>) -> Vec<FilterChain> {
        Vec::new()
    }

    fn on_inbound_passthrough(
        &self,
        _input: &InputParams<'_>,
        _mutable: &mut MutableObjects,
    ) -> Result<()> {
        Ok(())
    }

    fn on_inbound_passthrough_filter_chains(&self, _input: &InputParams<'_>) -> Vec<FilterChain> {
        Vec::new()
    }
}
