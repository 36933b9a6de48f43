//! Health Check HTTP filter configuration helpers
//!
//! Configuration for Envoy's health check filter in the shape the sidecar
//! bypass needs: a single exact `:path` matcher, optionally in pass-through
//! mode so the request still reaches the application.

use crate::xds::filters::{any_from_message, invalid_config};
use envoy_types::pb::envoy::config::route::v3::header_matcher::HeaderMatchSpecifier;
use envoy_types::pb::envoy::config::route::v3::HeaderMatcher;
use envoy_types::pb::envoy::extensions::filters::http::health_check::v3::HealthCheck as HealthCheckProto;
use envoy_types::pb::envoy::r#type::matcher::v3::string_matcher::MatchPattern;
use envoy_types::pb::envoy::r#type::matcher::v3::StringMatcher;
use envoy_types::pb::google::protobuf::{Any as EnvoyAny, BoolValue};
use prost::Message;
use serde::{Deserialize, Serialize};

/// Well-known Envoy name of the health check HTTP filter
pub const HEALTH_CHECK_FILTER_NAME: &str = "envoy.filters.http.health_check";

pub const HEALTH_CHECK_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.http.health_check.v3.HealthCheck";

const PATH_HEADER: &str = ":path";

/// Configuration for health check filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    /// Whether to forward matching requests to the application
    #[serde(default)]
    pub pass_through_mode: bool,
    /// Path matched exactly against the `:path` pseudo-header
    pub path: String,
}

impl HealthCheckConfig {
    /// Pass-through config for a probe path
    pub fn pass_through(path: impl Into<String>) -> Self {
        Self { pass_through_mode: true, path: path.into() }
    }

    /// Build the Envoy proto
    pub fn to_proto(&self) -> HealthCheckProto {
        HealthCheckProto {
            pass_through_mode: Some(BoolValue { value: self.pass_through_mode }),
            headers: vec![HeaderMatcher {
                name: PATH_HEADER.to_string(),
                header_match_specifier: Some(HeaderMatchSpecifier::StringMatch(StringMatcher {
                    match_pattern: Some(MatchPattern::Exact(self.path.clone())),
                    ignore_case: false,
                })),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Convert to Envoy Any payload
    pub fn to_any(&self) -> EnvoyAny {
        any_from_message(HEALTH_CHECK_TYPE_URL, &self.to_proto())
    }

    /// Build configuration from Envoy proto
    pub fn from_proto(proto: &HealthCheckProto) -> Result<Self, crate::Error> {
        let pass_through_mode = proto.pass_through_mode.as_ref().map(|v| v.value).unwrap_or(false);

        let path = proto
            .headers
            .iter()
            .find(|h| h.name == PATH_HEADER)
            .and_then(|h| match &h.header_match_specifier {
                Some(HeaderMatchSpecifier::StringMatch(sm)) => match &sm.match_pattern {
                    Some(MatchPattern::Exact(path)) => Some(path.clone()),
                    _ => None,
                },
                Some(HeaderMatchSpecifier::ExactMatch(path)) => Some(path.clone()),
                _ => None,
            })
            .ok_or_else(|| invalid_config("HealthCheck has no exact ':path' header matcher"))?;

        Ok(Self { pass_through_mode, path })
    }

    /// Decode configuration from an Envoy Any payload
    pub fn from_any(any: &EnvoyAny) -> Result<Self, crate::Error> {
        if any.type_url != HEALTH_CHECK_TYPE_URL {
            return Err(invalid_config(format!(
                "Unexpected type URL '{}' for health check filter",
                any.type_url
            )));
        }

        let proto = HealthCheckProto::decode(any.value.as_slice()).map_err(|err| {
            invalid_config(format!("Failed to decode health check config: {}", err))
        })?;

        Self::from_proto(&proto)
    }

    /// Decode `any` only if it is exactly the encoding this type produces.
    ///
    /// Payloads carrying extra settings (cache time, extra headers) yield `None`.
    pub fn from_canonical_any(any: &EnvoyAny) -> Option<Self> {
        let config = Self::from_any(any).ok()?;
        (config.to_any().value == any.value).then_some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envoy_types::pb::google::protobuf::Duration as ProtoDuration;

    #[test]
    fn builds_proto() {
        let any = HealthCheckConfig::pass_through("/healthz").to_any();
        assert_eq!(any.type_url, HEALTH_CHECK_TYPE_URL);

        let proto = HealthCheckProto::decode(any.value.as_slice()).expect("decode proto");
        assert_eq!(proto.pass_through_mode, Some(BoolValue { value: true }));
        assert_eq!(proto.headers.len(), 1);
        assert_eq!(proto.headers[0].name, ":path");
        assert!(proto.cache_time.is_none());
    }

    #[test]
    fn decodes_legacy_exact_match() {
        let proto = HealthCheckProto {
            pass_through_mode: Some(BoolValue { value: true }),
            headers: vec![HeaderMatcher {
                name: ":path".into(),
                header_match_specifier: Some(HeaderMatchSpecifier::ExactMatch("/live".into())),
                ..Default::default()
            }],
            ..Default::default()
        };

        let config = HealthCheckConfig::from_proto(&proto).expect("from_proto");
        assert_eq!(config, HealthCheckConfig::pass_through("/live"));
    }

    #[test]
    fn missing_path_matcher_is_rejected() {
        let proto = HealthCheckProto::default();
        let err = HealthCheckConfig::from_proto(&proto).expect_err("no path matcher");
        assert!(err.to_string().contains(":path"));
    }

    #[test]
    fn wrong_type_url_is_rejected() {
        let mut any = HealthCheckConfig::pass_through("/healthz").to_any();
        any.type_url = "type.googleapis.com/test.Other".into();
        assert!(HealthCheckConfig::from_any(&any).is_err());
    }

    #[test]
    fn canonical_decoding_ignores_extended_payloads() {
        let config = HealthCheckConfig::pass_through("/healthz");
        assert_eq!(HealthCheckConfig::from_canonical_any(&config.to_any()), Some(config.clone()));

        let mut proto = config.to_proto();
        proto.cache_time = Some(ProtoDuration { seconds: 5, nanos: 0 });
        let extended = any_from_message(HEALTH_CHECK_TYPE_URL, &proto);
        assert_eq!(HealthCheckConfig::from_canonical_any(&extended), None);
    }

    #[test]
    fn pass_through_disabled_survives_decoding() {
        let config = HealthCheckConfig { pass_through_mode: false, path: "/health".into() };
        let decoded = HealthCheckConfig::from_any(&config.to_any()).expect("from_any");
        assert!(!decoded.pass_through_mode);
        assert_eq!(decoded.path, "/health");
    }
}
