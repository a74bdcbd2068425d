//! Configuration Module
//!
//! Client configuration and the resource-key to URL endpoint table.

pub mod endpoints;

pub use endpoints::{ClientConfig, EndpointMap, REFERENCE_KEYS, RESOURCE_KEYS};
