//! HTTP Client
//!
//! Async HTTP session with the fixed Datorama header set and the shared
//! response-handling routine.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{DatoramaError, Result};

/// HTTP client carrying the fixed header set on every request
///
/// Holds no mutable state; the inner `reqwest::Client` may be reused from
/// multiple tasks concurrently.
pub struct HttpClient {
    /// Inner reqwest client with the session headers installed as defaults
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client authenticated with `token`.
    ///
    /// The API expects the raw token in the `Authorization` header, with no
    /// `Bearer` scheme prefix.
    pub fn new(token: &str, config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(token)
                .map_err(|e| DatoramaError::Config(format!("Invalid API token format: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DatoramaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.execute(Method::GET, url, None).await
    }

    /// Issue a PUT request with an optional JSON text body
    pub async fn put(&self, url: &str, body: Option<String>) -> Result<Value> {
        self.execute(Method::PUT, url, body).await
    }

    /// Issue a POST request with an optional JSON text body
    pub async fn post(&self, url: &str, body: Option<String>) -> Result<Value> {
        self.execute(Method::POST, url, body).await
    }

    /// Issue a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.execute(Method::DELETE, url, None).await
    }

    /// Single round-trip: send the request, read the full body, then hand
    /// status and body to `handle_response`.
    async fn execute(&self, method: Method, url: &str, body: Option<String>) -> Result<Value> {
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            warn!(%url, status, "request returned non-200 status");
        }

        let body = response.text().await?;
        handle_response(status, &body)
    }
}

/// Parse a response body and map the status code onto the crate error model.
///
/// The body is parsed exactly once: a body that is not valid JSON is a
/// `Decode` error whatever the status code, a non-200 status carries the
/// parsed body as the error payload, and a 200 returns the parsed body
/// unchanged.
pub(crate) fn handle_response(status: u16, body: &str) -> Result<Value> {
    let content: Value = serde_json::from_str(body).map_err(|e| {
        // Truncate on a char boundary; a byte index could split a multibyte
        // character and panic.
        let excerpt = body.char_indices().nth(500).map_or(body, |(i, _)| &body[..i]);
        DatoramaError::Decode(format!("{}. Body: {}", e, excerpt))
    })?;

    if status != 200 {
        return Err(DatoramaError::BadRequest {
            status,
            payload: content,
        });
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("token", &ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_rejects_invalid_token() {
        let result = HttpClient::new("bad\ntoken", &ClientConfig::default());
        assert!(matches!(result.err(), Some(DatoramaError::Config(_))));
    }

    #[test]
    fn test_handle_response_returns_body_unchanged_on_200() {
        let body = r#"{"rows":[{"id":1},{"id":2}],"total":2}"#;
        let content = handle_response(200, body).unwrap();
        assert_eq!(content, json!({"rows": [{"id": 1}, {"id": 2}], "total": 2}));
    }

    #[test]
    fn test_handle_response_non_200_carries_parsed_payload() {
        let body = r#"{"errorCode":"QUERY_INVALID","message":"bad dimension"}"#;
        let err = handle_response(400, body).unwrap_err();
        match err {
            DatoramaError::BadRequest { status, payload } => {
                assert_eq!(status, 400);
                assert_eq!(payload["errorCode"], "QUERY_INVALID");
                assert_eq!(payload["message"], "bad dimension");
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_response_invalid_json_is_decode_error() {
        let err = handle_response(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, DatoramaError::Decode(_)));
    }

    #[test]
    fn test_handle_response_long_multibyte_body_is_decode_error() {
        // Byte 500 lands inside the multibyte character; the excerpt must
        // still be produced without panicking.
        let mut body = " ".repeat(499);
        body.push('日');
        body.push_str("not json");
        let err = handle_response(200, &body).unwrap_err();
        assert!(matches!(err, DatoramaError::Decode(_)));
    }

    #[test]
    fn test_handle_response_invalid_json_wins_over_bad_status() {
        // A 500 with a non-JSON body is a decode failure, not a BadRequest.
        let err = handle_response(500, "Internal Server Error").unwrap_err();
        assert!(matches!(err, DatoramaError::Decode(_)));
    }
}
