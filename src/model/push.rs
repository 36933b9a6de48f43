//! Per-push view of workload health-check probes.

use super::probe::{Probe, ProbeList};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves the health-check probes declared by the workload at an address.
pub trait ProbeSource {
    /// Probes for the workload listening on `ip`, in declaration order.
    fn probes_for_address(&self, ip: &str) -> &[Probe];
}

/// In-memory probe index for a single push cycle, keyed by workload IP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushContext {
    workload_probes: HashMap<String, ProbeList>,
}

impl PushContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append probes for the workload at `ip`.
    pub fn add_probes(&mut self, ip: impl Into<String>, probes: impl IntoIterator<Item = Probe>) {
        self.workload_probes.entry(ip.into()).or_default().extend(probes);
    }

    pub fn with_probes(mut self, ip: impl Into<String>, probes: ProbeList) -> Self {
        self.add_probes(ip, probes);
        self
    }
}

impl ProbeSource for PushContext {
    fn probes_for_address(&self, ip: &str) -> &[Probe] {
        self.workload_probes.get(ip).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_address_has_no_probes() {
        let push = PushContext::new();
        assert!(push.probes_for_address("10.0.0.9").is_empty());
    }

    #[test]
    fn probes_keep_declaration_order() {
        let mut push = PushContext::new();
        push.add_probes("10.0.0.1", vec![Probe::new("/b", None)]);
        push.add_probes("10.0.0.1", vec![Probe::new("/a", Some(80))]);

        let probes = push.probes_for_address("10.0.0.1");
        assert_eq!(probes[0].path, "/b");
        assert_eq!(probes[1].path, "/a");
    }
}
