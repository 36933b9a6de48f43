//! Appends health check bypass filters to a filter chain.

use crate::model::Probe;
use crate::networking::FilterChain;
use crate::xds::filters::http::health_check::HealthCheckConfig;
use crate::xds::filters::http::{HttpFilterConfigEntry, HttpFilterKind};
use std::collections::HashSet;

/// Identity of a health check filter for duplicate detection.
///
/// Two entries with the same key serialize to the same Envoy filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub name: String,
    pub path: String,
    pub pass_through_mode: bool,
    pub is_optional: bool,
    pub disabled: bool,
}

impl FilterKey {
    /// Key of `entry`, `None` for entries that are not health check filters
    pub fn of(entry: &HttpFilterConfigEntry) -> Option<Self> {
        let config = entry.health_check_config()?;
        Some(Self {
            name: entry.resolved_name().to_string(),
            path: config.path,
            pass_through_mode: config.pass_through_mode,
            is_optional: entry.is_optional,
            disabled: entry.disabled,
        })
    }
}

/// Health check filter for a probe: pass-through with an exact `:path` match.
pub fn build_health_check_filter(probe: &Probe) -> HttpFilterConfigEntry {
    HttpFilterConfigEntry::new(HttpFilterKind::HealthCheck(HealthCheckConfig::pass_through(
        probe.path.clone(),
    )))
}

/// Append one health check filter per probe unless an equal filter is present.
///
/// Existing filters keep their positions. Returns the number of filters added.
pub fn apply_health_check_filters(chain: &mut FilterChain, probes: &[&Probe]) -> usize {
    let mut present: HashSet<FilterKey> =
        chain.http_filters.iter().filter_map(FilterKey::of).collect();
    let before = chain.http_filters.len();

    for probe in probes {
        let filter = build_health_check_filter(probe);
        let Some(key) = FilterKey::of(&filter) else {
            continue;
        };

        if present.insert(key) {
            tracing::debug!(path = %probe.path, "appending health check filter");
            chain.http_filters.push(filter);
        }
    }

    chain.http_filters.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networking::ListenerProtocol;
    use crate::xds::filters::{Base64Bytes, TypedConfig};

    fn cors() -> HttpFilterConfigEntry {
        HttpFilterConfigEntry {
            name: Some("envoy.filters.http.cors".into()),
            is_optional: false,
            disabled: false,
            filter: HttpFilterKind::Custom {
                config: TypedConfig {
                    type_url: "type.googleapis.com/envoy.extensions.filters.http.cors.v3.Cors"
                        .into(),
                    value: Base64Bytes(vec![]),
                },
            },
        }
    }

    fn paths(chain: &FilterChain) -> Vec<Option<String>> {
        chain.http_filters.iter().map(|f| f.health_check_config().map(|c| c.path)).collect()
    }

    #[test]
    fn builds_pass_through_filter() {
        let filter = build_health_check_filter(&Probe::new("/healthz", Some(80)));
        assert_eq!(filter.resolved_name(), "envoy.filters.http.health_check");
        assert_eq!(filter.health_check_config(), Some(HealthCheckConfig::pass_through("/healthz")));
    }

    #[test]
    fn appends_after_existing_filters_in_probe_order() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        chain.http_filters.push(cors());

        let a = Probe::new("/a", None);
        let b = Probe::new("/b", None);
        assert_eq!(apply_health_check_filters(&mut chain, &[&a, &b]), 2);

        assert_eq!(chain.http_filters[0], cors());
        assert_eq!(paths(&chain), vec![None, Some("/a".into()), Some("/b".into())]);
    }

    #[test]
    fn second_application_is_a_no_op() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        let probe = Probe::new("/healthz", None);

        apply_health_check_filters(&mut chain, &[&probe]);
        let once = chain.clone();
        assert_eq!(apply_health_check_filters(&mut chain, &[&probe]), 0);
        assert_eq!(chain, once);
    }

    #[test]
    fn identical_probes_collapse() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        let probe = Probe::new("/ready", Some(8080));
        let twin = probe.clone();

        assert_eq!(apply_health_check_filters(&mut chain, &[&probe, &twin]), 1);
        assert_eq!(chain.http_filters.len(), 1);
    }

    #[test]
    fn same_path_different_ports_collapse() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        let a = Probe::new("/ready", None);
        let b = Probe::new("/ready", Some(8080));

        assert_eq!(apply_health_check_filters(&mut chain, &[&a, &b]), 1);
    }

    #[test]
    fn encoded_equivalent_counts_as_present() {
        let probe = Probe::new("/healthz", None);
        let encoded = build_health_check_filter(&probe).to_http_filter();

        let mut chain = FilterChain::new(ListenerProtocol::Http);
        chain.http_filters.push(HttpFilterConfigEntry::from_http_filter(&encoded).unwrap());

        assert_eq!(apply_health_check_filters(&mut chain, &[&probe]), 0);
    }

    #[test]
    fn differing_flags_are_not_duplicates() {
        let probe = Probe::new("/healthz", None);
        let mut optional = build_health_check_filter(&probe);
        optional.is_optional = true;

        let mut chain = FilterChain::new(ListenerProtocol::Http);
        chain.http_filters.push(optional);

        assert_eq!(apply_health_check_filters(&mut chain, &[&probe]), 1);
    }

    #[test]
    fn non_pass_through_filter_is_not_a_duplicate() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        chain.http_filters.push(HttpFilterConfigEntry::new(HttpFilterKind::HealthCheck(
            HealthCheckConfig { pass_through_mode: false, path: "/healthz".into() },
        )));

        let probe = Probe::new("/healthz", None);
        assert_eq!(apply_health_check_filters(&mut chain, &[&probe]), 1);
    }

    #[test]
    fn no_probes_no_mutation() {
        let mut chain = FilterChain::new(ListenerProtocol::Http);
        chain.http_filters.push(cors());
        assert_eq!(apply_health_check_filters(&mut chain, &[]), 0);
        assert_eq!(chain.http_filters, vec![cors()]);
    }
}
