//! Filter utilities for Envoy HTTP filters.
//!
//! This module owns the data-to-wire step: plugin logic works on plain filter
//! descriptors, and the types here turn them into Envoy protobuf messages.
//!
//! # Architecture
//!
//! Filter modules follow a consistent pattern:
//! - High-level Rust configuration structs with serde support
//! - `to_any()` methods converting to Envoy protobuf `Any` messages
//! - `from_proto()` / `from_any()` methods for decoding
//!
//! # Example
//!
//! ```rust,ignore
//! use sidecar_health::xds::filters::http::health_check::HealthCheckConfig;
//!
//! let config = HealthCheckConfig::pass_through("/healthz");
//! let any = config.to_any();
//! ```

pub mod http;

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use envoy_types::pb::google::protobuf::Any;
use prost::Message;
use serde::{Deserialize, Serialize};

/// Wrapper for binary protobuf payloads serialized as base64 in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Base64Bytes(pub Vec<u8>);

impl Serialize for Base64Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let encoded = BASE64_ENGINE.encode(&self.0);
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Base64Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let decoded = BASE64_ENGINE
            .decode(encoded.as_bytes())
            .map_err(|err| serde::de::Error::custom(err.to_string()))?;
        Ok(Base64Bytes(decoded))
    }
}

/// Generic representation of a typed Envoy protobuf `Any` payload.
///
/// - `type_url`: Fully-qualified protobuf type
/// - `value`: Base64-encoded protobuf message bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedConfig {
    pub type_url: String,
    #[serde(default)]
    pub value: Base64Bytes,
}

impl TypedConfig {
    /// Creates a typed config from a prost message.
    pub fn from_message<M: Message>(type_url: impl Into<String>, msg: &M) -> Self {
        Self { type_url: type_url.into(), value: Base64Bytes(msg.encode_to_vec()) }
    }

    /// Creates a typed config from an Envoy `Any`.
    pub fn from_any(any: &Any) -> Self {
        Self { type_url: any.type_url.clone(), value: Base64Bytes(any.value.clone()) }
    }

    /// Converts to Envoy `Any` structure for xDS protocol.
    pub fn to_any(&self) -> Any {
        Any { type_url: self.type_url.clone(), value: self.value.0.clone() }
    }
}

/// Helper for building Envoy `Any` values from prost messages.
pub fn any_from_message<M: Message>(type_url: impl Into<String>, msg: &M) -> Any {
    TypedConfig::from_message(type_url, msg).to_any()
}

/// Error helper for invalid filter configuration.
pub fn invalid_config(msg: impl Into<String>) -> crate::Error {
    crate::Error::config(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[derive(Clone, PartialEq, Eq, Message)]
    struct TestMessage {
        #[prost(string, tag = "1")]
        field: String,
    }

    #[test]
    fn base64_serializes_as_string() {
        let original = Base64Bytes(vec![1, 2, 3, 4]);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"AQIDBA==\"");

        let decoded: Base64Bytes = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result = serde_json::from_str::<Base64Bytes>("\"not base64!\"");
        assert!(result.is_err());
    }

    #[test]
    fn typed_config_from_message() {
        let msg = TestMessage { field: "hello".into() };
        let typed = TypedConfig::from_message("type.googleapis.com/test.Message", &msg);
        let any = typed.to_any();
        assert_eq!(any.type_url, "type.googleapis.com/test.Message");
        assert_eq!(TypedConfig::from_any(&any), typed);
    }
}
