//! Error types
//!
//! One error type for the whole library. Validation failures are raised
//! locally before any request is sent; `Api` and `Transport` come back from
//! the HTTP layer; `NotRegistered` is a wiring mistake.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the client, the query layer and the dependency registry.
#[derive(Debug, Error)]
pub enum Error {
    /// Local validation failed; no request was sent.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("API request failed ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Nothing was registered under the requested key.
    #[error("dependency not registered: {0}")]
    NotRegistered(String),

    /// The resource's endpoint does not offer this operation.
    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: String,
        operation: &'static str,
    },

    /// No resource definition exists for the key.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Invalid base URL or configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error for a form field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of the failure, if the server produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// True when the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotRegistered(_)
                | Self::Unsupported { .. }
                | Self::UnknownResource(_)
                | Self::Config(_)
        )
    }

    /// Field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Format an error for a toast or a terminal line.
///
/// Server messages are shown as-is; otherwise a generic message per status.
pub fn format_error(error: &Error) -> String {
    match error {
        Error::Api { status, message } if !message.is_empty() => {
            format!("{} ({})", message, status.as_u16())
        }
        Error::Api { status, .. } => fallback_message(*status).to_string(),
        Error::Transport(e) if e.is_timeout() => {
            "Request timed out. Please try again.".to_string()
        }
        Error::Transport(e) if e.is_connect() => {
            "Could not reach the server. Check the base URL and your network.".to_string()
        }
        Error::Transport(_) => "Request failed. Check your network connection and try again.".to_string(),
        other => other.to_string(),
    }
}

fn fallback_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Invalid request. Check your parameters.",
        401 => "Authentication failed.",
        403 => "Permission denied.",
        404 => "Resource not found.",
        409 => "Resource conflict. The record may already exist or be in use.",
        429 => "Rate limit exceeded. Please try again later.",
        500..=599 => "Server temporarily unavailable. Please try again.",
        _ => "Something went wrong.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_preferred() {
        let err = Error::Api {
            status: StatusCode::CONFLICT,
            message: "Product name taken".to_string(),
        };
        assert_eq!(format_error(&err), "Product name taken (409)");
    }

    #[test]
    fn test_fallback_when_message_empty() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        };
        assert_eq!(format_error(&err), "Resource not found.");

        let err = Error::Api {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
        };
        assert!(format_error(&err).contains("temporarily unavailable"));
    }

    #[test]
    fn test_local_errors() {
        assert!(Error::validation("id", "required").is_local());
        assert!(Error::NotRegistered("productService".into()).is_local());
        let api = Error::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".into(),
        };
        assert!(!api.is_local());
        assert_eq!(api.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_error_response_parses_without_status() {
        let body: ErrorResponse = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(body.message, "nope");
        assert!(body.status_code.is_none());
    }
}
