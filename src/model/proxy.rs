//! Proxy identity and the service instance it fronts.

use serde::{Deserialize, Serialize};

/// Role of the proxy being configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Sidecar next to a workload
    #[serde(alias = "sidecar")]
    SidecarProxy,
    /// Standalone gateway/router
    Router,
}

/// The proxy node requesting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Local addresses the proxy listens on
    #[serde(default)]
    pub ip_addresses: Vec<String>,
}

impl Proxy {
    pub fn is_sidecar(&self) -> bool {
        self.node_type == NodeType::SidecarProxy
    }
}

/// Concrete network endpoint of a service instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub address: String,
    /// Port the inbound filter chain serves
    pub endpoint_port: u32,
}

/// Service instance bound to the proxy being configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    #[serde(default)]
    pub service: String,
    pub endpoint: Endpoint,
}
