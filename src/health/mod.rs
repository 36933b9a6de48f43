//! Health check bypass for sidecar inbound listeners.
//!
//! Requests on a workload's probe paths are marked by Envoy's health check
//! filter in pass-through mode, so they reach the application unchanged but
//! are kept out of tracing and request telemetry.
//!
//! For every inbound HTTP filter chain and every address the proxy listens
//! on, the probes declared for that address are matched against the bound
//! endpoint port ([`select_applicable_probes`]) and a filter is appended per
//! probe unless an equal one is already present
//! ([`apply_health_check_filters`]).

mod matcher;
mod mutator;

pub use matcher::select_applicable_probes;
pub use mutator::{apply_health_check_filters, build_health_check_filter, FilterKey};

use crate::networking::{InboundListenerMutator, InputParams, MutableObjects};
use crate::{plugin_span, Error, Result};
use tracing::debug;

/// Plugin placing health check bypass filters on sidecar inbound listeners
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthCheckPlugin;

impl HealthCheckPlugin {
    pub const NAME: &'static str = "health";

    pub fn new() -> Self {
        Self
    }
}

impl InboundListenerMutator for HealthCheckPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn mutate_inbound_listener(
        &self,
        input: &InputParams<'_>,
        mutable: &mut MutableObjects,
    ) -> Result<()> {
        let Some(node) = input.node else {
            return Ok(());
        };

        let span = plugin_span!(self.name(), "on_inbound_listener", node.id);
        let _guard = span.enter();

        if !node.is_sidecar() {
            debug!(node_type = ?node.node_type, "skipping non-sidecar proxy");
            return Ok(());
        }

        let Some(instance) = input.service_instance else {
            debug!("no service instance bound to listener");
            return Ok(());
        };

        let chain_count = match mutable.listener.as_ref() {
            Some(listener) => listener.filter_chains.len(),
            None => return Err(Error::listener_not_defined(&*mutable)),
        };

        let endpoint_port = instance.endpoint.endpoint_port;
        let mut added = 0;

        for (index, chain) in mutable.filter_chains.iter_mut().take(chain_count).enumerate() {
            if !chain.is_http() {
                continue;
            }

            for ip in &node.ip_addresses {
                let probes = input.push.probes_for_address(ip);
                let applicable = select_applicable_probes(probes, endpoint_port);
                let count = apply_health_check_filters(chain, &applicable);

                if count > 0 {
                    debug!(
                        filter_chain = index,
                        ip = %ip,
                        added = count,
                        "health check filters added"
                    );
                }
                added += count;
            }
        }

        debug!(endpoint_port, added, "inbound listener processed");
        Ok(())
    }
}
