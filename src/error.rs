//! Datorama Error Types
//!
//! Error handling for the Datorama API client.

use std::fmt;

/// Main error type for Datorama operations
#[derive(Debug)]
pub enum DatoramaError {
    /// Configuration errors (invalid token, client build failure, etc.)
    Config(String),

    /// Resource key not present in the endpoint table
    UnknownResource(String),

    /// Request payload could not be serialized to JSON
    Encode(String),

    /// Response body is not valid JSON
    Decode(String),

    /// The API returned a non-200 status; carries the parsed error payload
    BadRequest {
        status: u16,
        payload: serde_json::Value,
    },

    /// HTTP request failed at the transport level
    Request(String),

    /// Request timed out
    Timeout(String),
}

impl fmt::Display for DatoramaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatoramaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DatoramaError::UnknownResource(key) => {
                write!(
                    f,
                    "Unknown resource key '{}'. No URL is configured for it, so no request was sent.",
                    key
                )
            }
            DatoramaError::Encode(msg) => write!(f, "Failed to encode request payload: {}", msg),
            DatoramaError::Decode(msg) => write!(f, "Failed to decode response body: {}", msg),
            DatoramaError::BadRequest { status, payload } => {
                write!(f, "API request failed with status {}: {}", status, payload)
            }
            DatoramaError::Request(msg) => write!(f, "Request failed: {}", msg),
            DatoramaError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
        }
    }
}

impl std::error::Error for DatoramaError {}

impl From<reqwest::Error> for DatoramaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DatoramaError::Timeout(err.to_string())
        } else if err.is_connect() {
            DatoramaError::Request(format!("Connection failed: {}", err))
        } else {
            DatoramaError::Request(err.to_string())
        }
    }
}

/// Result type alias for Datorama operations
pub type Result<T> = std::result::Result<T, DatoramaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_display_includes_status_and_payload() {
        let err = DatoramaError::BadRequest {
            status: 422,
            payload: serde_json::json!({"message": "invalid query"}),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("invalid query"));
    }

    #[test]
    fn test_unknown_resource_display_names_the_key() {
        let err = DatoramaError::UnknownResource("nope".to_string());
        assert!(err.to_string().contains("'nope'"));
    }
}
