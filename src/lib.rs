//! # Sidecar Health
//!
//! Control-plane plugin that keeps workload health checks out of request
//! tracing. For every inbound HTTP filter chain of a sidecar proxy it appends
//! Envoy's health check filter in pass-through mode for each liveness and
//! readiness probe that targets the chain, without duplicating filters that
//! are already present.
//!
//! ## Architecture
//!
//! ```text
//! Plugin host → HealthCheckPlugin → Probe matcher → Filter chain mutator
//!                                                        ↓
//!                                   xds::filters (HttpFilter / Any encoding)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sidecar_health::health::HealthCheckPlugin;
//! use sidecar_health::model::{Endpoint, NodeType, Probe, Proxy, PushContext, ServiceInstance};
//! use sidecar_health::networking::{InputParams, MutableObjects, Plugin};
//!
//! # fn run(mut mutable: MutableObjects) -> sidecar_health::Result<()> {
//! let push = PushContext::new().with_probes("10.0.0.1", vec![Probe::new("/healthz", None)]);
//! let proxy = Proxy {
//!     id: "sidecar~10.0.0.1".into(),
//!     node_type: NodeType::SidecarProxy,
//!     ip_addresses: vec!["10.0.0.1".into()],
//! };
//! let instance = ServiceInstance {
//!     service: "app".into(),
//!     endpoint: Endpoint { address: "10.0.0.1".into(), endpoint_port: 8080 },
//! };
//! let input = InputParams::new(&push).with_node(&proxy).with_service_instance(&instance);
//! HealthCheckPlugin::new().on_inbound_listener(&input, &mut mutable)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod health;
pub mod model;
pub mod networking;
pub mod observability;
pub mod xds;

pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
