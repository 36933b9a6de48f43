//! Workload liveness/readiness probe definitions.

use serde::{Deserialize, Serialize};

/// A declared HTTP health-check probe for a workload.
///
/// `port` pins the probe to the listener serving that port; a probe without a
/// port applies to whichever chain is being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Probe {
    /// HTTP path matched exactly against `:path`
    pub path: String,
    /// Listener port the probe targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
}

impl Probe {
    pub fn new(path: impl Into<String>, port: Option<u32>) -> Self {
        Self { path: path.into(), port }
    }

    /// Whether the probe targets the chain listening on `chain_port`.
    pub fn targets_port(&self, chain_port: u32) -> bool {
        match self.port {
            None => true,
            Some(port) => port == chain_port,
        }
    }
}

/// Ordered probes for a workload; duplicates are allowed.
pub type ProbeList = Vec<Probe>;
