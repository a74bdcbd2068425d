//! Endpoint Configuration
//!
//! Maps logical resource keys to absolute URLs. The table is built once at
//! client construction from the configured base URL and never mutated, so
//! tests can point the whole client at a mock server by swapping the base URL.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{DatoramaError, Result};

/// Default base URL for the Datorama API
pub const DEFAULT_BASE_URL: &str = "https://api.datorama.com";

/// Every resource key the client knows, with its path under the base URL
pub const RESOURCE_KEYS: [(&str, &str); 11] = [
    ("query", "/v1/query"),
    ("query-batch", "/v1/query-batch"),
    ("accounts", "/v1/accounts"),
    ("workspaces", "/v1/workspaces"),
    ("data_streams", "/v1/data-streams"),
    ("time_zones", "/v1/reference/time-zones"),
    ("currencies", "/v1/reference/currencies"),
    ("cultures", "/v1/reference/cultures"),
    ("verticals", "/v1/reference/verticals"),
    ("data_sources", "/v1/reference/data-sources"),
    ("languages", "/v1/reference/languages"),
];

/// The subset of keys that name static reference entities
pub const REFERENCE_KEYS: [&str; 6] = [
    "time_zones",
    "currencies",
    "cultures",
    "verticals",
    "data_sources",
    "languages",
];

/// Client configuration
///
/// Everything here is fixed for the lifetime of the client. Timeouts are
/// explicit rather than baked into the transport defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (trailing slash is stripped)
    pub base_url: String,

    /// Overall per-request timeout
    pub timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with a custom base URL and default timeouts
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Immutable resource-key to absolute-URL mapping
#[derive(Debug, Clone)]
pub struct EndpointMap {
    urls: HashMap<&'static str, String>,
}

impl EndpointMap {
    /// Build the table from a base URL
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let urls = RESOURCE_KEYS
            .iter()
            .map(|(key, path)| (*key, format!("{}{}", base, path)))
            .collect();
        Self { urls }
    }

    /// Look up the URL for a resource key
    pub fn url(&self, key: &str) -> Result<&str> {
        self.urls
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| DatoramaError::UnknownResource(key.to_string()))
    }

    /// Look up the URL for a single item of a resource, e.g. `/v1/workspaces/42`
    pub fn item_url(&self, key: &str, id: u64) -> Result<String> {
        Ok(format!("{}/{}", self.url(key)?, id))
    }

    /// Look up the URL for a reference resource; non-reference keys are
    /// rejected so `list_all("query")` cannot GET a non-reference endpoint
    pub fn reference_url(&self, key: &str) -> Result<&str> {
        if !REFERENCE_KEYS.contains(&key) {
            return Err(DatoramaError::UnknownResource(key.to_string()));
        }
        self.url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.datorama.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_map_builds_all_urls() {
        let map = EndpointMap::new(DEFAULT_BASE_URL);
        assert_eq!(map.url("query").unwrap(), "https://api.datorama.com/v1/query");
        assert_eq!(
            map.url("query-batch").unwrap(),
            "https://api.datorama.com/v1/query-batch"
        );
        assert_eq!(
            map.url("data_streams").unwrap(),
            "https://api.datorama.com/v1/data-streams"
        );
        assert_eq!(
            map.url("time_zones").unwrap(),
            "https://api.datorama.com/v1/reference/time-zones"
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let map = EndpointMap::new("http://localhost:1234/");
        assert_eq!(map.url("accounts").unwrap(), "http://localhost:1234/v1/accounts");
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let map = EndpointMap::new(DEFAULT_BASE_URL);
        let err = map.url("worskpaces").unwrap_err();
        assert!(matches!(err, DatoramaError::UnknownResource(_)));
    }

    #[test]
    fn test_item_url_appends_id() {
        let map = EndpointMap::new(DEFAULT_BASE_URL);
        assert_eq!(
            map.item_url("workspaces", 42).unwrap(),
            "https://api.datorama.com/v1/workspaces/42"
        );
    }

    #[test]
    fn test_reference_url_rejects_non_reference_keys() {
        let map = EndpointMap::new(DEFAULT_BASE_URL);
        assert!(map.reference_url("currencies").is_ok());
        let err = map.reference_url("query").unwrap_err();
        assert!(matches!(err, DatoramaError::UnknownResource(_)));
    }
}
