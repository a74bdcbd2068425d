//! Datorama - Marketing Cloud Intelligence API Client
//!
//! A Rust client for the Datorama REST API. It authenticates requests with a
//! raw API token, builds endpoint URLs from an immutable resource table, and
//! normalizes response handling: every call returns the parsed JSON body on a
//! 200, and a `BadRequest` error carrying the service's parsed error payload
//! on anything else.
//!
//! # Example
//!
//! ```no_run
//! use datorama::Datorama;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), datorama::DatoramaError> {
//! let client = Datorama::new("your_api_token")?;
//!
//! let result = client
//!     .query(&json!({
//!         "workspaceId": "12345",
//!         "dateRange": "THIS_MONTH",
//!         "measurements": [{"name": "Data Stream Total Rows"}],
//!         "dimensions": ["Data Stream"],
//!     }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;

pub mod client;
pub mod config;
pub mod error;

use client::HttpClient;
use config::EndpointMap;
use error::Result;

pub use config::ClientConfig;
pub use error::DatoramaError;

/// The main Datorama API client
///
/// Holds the endpoint table and one long-lived HTTP session with the fixed
/// header set. Construction performs no network I/O; each operation is a
/// single request/response round-trip with no retries.
pub struct Datorama {
    /// Resource-key to URL table, fixed at construction
    endpoints: EndpointMap,

    /// HTTP session carrying the authentication headers
    http_client: HttpClient,
}

impl Datorama {
    /// Create a client for the production API with default timeouts
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with an injected configuration (base URL, timeouts)
    pub fn with_config(token: &str, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoints: EndpointMap::new(&config.base_url),
            http_client: HttpClient::new(token, &config)?,
        })
    }

    // -------------------------------------------------------------------------
    // Verb dispatch by resource key
    // -------------------------------------------------------------------------

    async fn get(&self, key: &str) -> Result<Value> {
        let url = self.endpoints.url(key)?;
        self.http_client.get(url).await
    }

    async fn post(&self, key: &str, body: Option<String>) -> Result<Value> {
        let url = self.endpoints.url(key)?;
        self.http_client.post(url, body).await
    }

    async fn get_item(&self, key: &str, id: u64) -> Result<Value> {
        let url = self.endpoints.item_url(key, id)?;
        self.http_client.get(&url).await
    }

    async fn put_item(&self, key: &str, id: u64, body: Option<String>) -> Result<Value> {
        let url = self.endpoints.item_url(key, id)?;
        self.http_client.put(&url, body).await
    }

    async fn delete_item(&self, key: &str, id: u64) -> Result<Value> {
        let url = self.endpoints.item_url(key, id)?;
        self.http_client.delete(&url).await
    }

    async fn post_item_action(
        &self,
        key: &str,
        id: u64,
        action: &str,
        body: Option<String>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.endpoints.item_url(key, id)?, action);
        self.http_client.post(&url, body).await
    }

    // -------------------------------------------------------------------------
    // Query API
    // -------------------------------------------------------------------------

    /// Run a query against the Query API.
    ///
    /// The query is an opaque payload (any `Serialize` value); the client
    /// encodes it to a JSON text body and does not validate its shape.
    pub async fn query<T: Serialize>(&self, query: &T) -> Result<Value> {
        let body = encode(query)?;
        self.post("query", Some(body)).await
    }

    /// Run several queries in a single request via the batch Query API
    pub async fn query_batch<T: Serialize>(&self, queries: &T) -> Result<Value> {
        let body = encode(queries)?;
        self.post("query-batch", Some(body)).await
    }

    // -------------------------------------------------------------------------
    // Workspace API
    // -------------------------------------------------------------------------

    /// List all workspaces visible to the token
    pub async fn list_workspaces(&self) -> Result<Vec<Value>> {
        as_list(self.get("workspaces").await?)
    }

    /// Find a workspace by its unique id
    pub async fn find_workspace(&self, id: u64) -> Result<Value> {
        self.get_item("workspaces", id).await
    }

    /// Create a new workspace
    pub async fn create_workspace<T: Serialize>(&self, workspace: &T) -> Result<Value> {
        let body = encode(workspace)?;
        self.post("workspaces", Some(body)).await
    }

    /// Update an existing workspace
    pub async fn update_workspace<T: Serialize>(&self, id: u64, workspace: &T) -> Result<Value> {
        let body = encode(workspace)?;
        self.put_item("workspaces", id, Some(body)).await
    }

    /// Delete a workspace
    pub async fn delete_workspace(&self, id: u64) -> Result<Value> {
        self.delete_item("workspaces", id).await
    }

    // -------------------------------------------------------------------------
    // Account API
    // -------------------------------------------------------------------------

    /// List all accounts visible to the token
    pub async fn list_accounts(&self) -> Result<Vec<Value>> {
        as_list(self.get("accounts").await?)
    }

    /// Find an account by its unique id
    pub async fn find_account(&self, id: u64) -> Result<Value> {
        self.get_item("accounts", id).await
    }

    // -------------------------------------------------------------------------
    // Data stream API
    // -------------------------------------------------------------------------

    /// List all data streams visible to the token
    pub async fn list_data_streams(&self) -> Result<Vec<Value>> {
        as_list(self.get("data_streams").await?)
    }

    /// Trigger processing of a data stream for the given date range payload
    pub async fn process_data_stream<T: Serialize>(&self, id: u64, dates: &T) -> Result<Value> {
        let body = encode(dates)?;
        self.post_item_action("data_streams", id, "process", Some(body))
            .await
    }

    // -------------------------------------------------------------------------
    // Reference API
    // -------------------------------------------------------------------------

    /// List a static reference entity.
    ///
    /// `reference` must be one of `time_zones`, `currencies`, `cultures`,
    /// `verticals`, `data_sources` or `languages`; any other name fails with
    /// `UnknownResource` before a request is sent.
    pub async fn list_all(&self, reference: &str) -> Result<Vec<Value>> {
        let url = self.endpoints.reference_url(reference)?;
        as_list(self.http_client.get(url).await?)
    }
}

/// Encode a request payload to a JSON text body
fn encode<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(payload).map_err(|e| DatoramaError::Encode(e.to_string()))
}

/// Interpret a response envelope as a list of objects
fn as_list(content: Value) -> Result<Vec<Value>> {
    serde_json::from_value(content).map_err(|e| DatoramaError::Decode(e.to_string()))
}
