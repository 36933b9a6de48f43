//! Envoy xDS wire types
//!
//! Serialization of plugin output into Envoy protobuf resources.

pub mod filters;
