//! Selects the probes that apply to a filter chain.

use crate::model::Probe;

/// Probes that apply to the chain serving `chain_port`, in input order.
///
/// A probe without a port applies to every chain it is evaluated against.
/// Duplicates are kept; the mutator collapses equal filters.
pub fn select_applicable_probes(probes: &[Probe], chain_port: u32) -> Vec<&Probe> {
    probes.iter().filter(|probe| probe.targets_port(chain_port)).collect()
}
