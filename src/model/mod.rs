//! Read-only inputs supplied by workload discovery for each push cycle.

mod probe;
mod proxy;
mod push;

pub use probe::{Probe, ProbeList};
pub use proxy::{Endpoint, NodeType, Proxy, ServiceInstance};
pub use push::{ProbeSource, PushContext};
