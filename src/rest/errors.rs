//! Error types for the response normalizer.
//!
//! # Error Handling
//!
//! The normalizer distinguishes four failure scenarios, one per
//! [`ErrorKind`]:
//!
//! - [`NormalizeError::Transport`]: the request never produced a usable response
//! - [`NormalizeError::MalformedBody`]: the body could not be decoded ([`DecodeError`])
//! - [`NormalizeError::Api`]: the body carried an API error object
//! - [`NormalizeError::StatusCode`]: the status code indicates failure, no details
//!
//! # Example
//!
//! ```rust
//! use ansible_forms::rest::{ErrorKind, NormalizeError};
//!
//! let error = NormalizeError::StatusCode { status_code: 503 };
//! assert_eq!(error.kind(), ErrorKind::StatusCodeError);
//! assert!(error.to_string().contains("503"));
//! ```

use thiserror::Error;

use crate::rest::ErrorKind;

/// A failure below the HTTP response layer (connection, TLS, timeout, ...).
///
/// The message is what ends up in
/// [`NormalizedResponse::transport_error`](crate::rest::NormalizedResponse::transport_error).
///
/// # Example
///
/// ```rust
/// use ansible_forms::rest::TransportError;
///
/// let error = TransportError::new("connection refused");
/// assert_eq!(error.to_string(), "connection refused");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error that keeps the underlying error as its source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned by the structural decoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is not valid JSON, or its top-level value is not an object.
    #[error("response body is not a valid JSON object: {reason}")]
    BadJson {
        /// Why parsing failed.
        reason: String,
    },

    /// A known field exists but has an incompatible shape.
    #[error("response field '{field}' has an unexpected shape: expected {expected}, found {found}")]
    BadStructure {
        /// The offending field, e.g. `records` or `records[1]`.
        field: String,
        /// The shape that was expected.
        expected: &'static str,
        /// The JSON type that was found.
        found: &'static str,
    },
}

impl DecodeError {
    pub(crate) fn bad_structure(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::BadStructure {
            field: field.into(),
            expected,
            found: json_type_name(found),
        }
    }
}

/// Returns a short name for the JSON type of `value`.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Error attached to a normalized response whose [`ErrorKind`] is not `None`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The transport failed; this is the caller's original error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body could not be decoded.
    #[error("unable to decode response body, status code {status_code}: {source}")]
    MalformedBody {
        /// The HTTP status code of the response.
        status_code: u16,
        /// The decoder failure.
        #[source]
        source: DecodeError,
    },

    /// The body carried an API error object.
    #[error("REST reported error code {code}: {message} (target: '{target}'), status code: {status_code}")]
    Api {
        /// API error code.
        code: String,
        /// API error message.
        message: String,
        /// API error target.
        target: String,
        /// The HTTP status code of the response.
        status_code: u16,
    },

    /// The status code indicates failure and no error object was present.
    #[error("status code indicates error, without details: {status_code}")]
    StatusCode {
        /// The HTTP status code of the response.
        status_code: u16,
    },
}

impl NormalizeError {
    /// Returns the [`ErrorKind`] this error corresponds to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::MalformedBody { .. } => ErrorKind::MalformedBody,
            Self::Api { .. } => ErrorKind::ApiError,
            Self::StatusCode { .. } => ErrorKind::StatusCodeError,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::MalformedBody { status_code, .. }
            | Self::Api { status_code, .. }
            | Self::StatusCode { status_code } => Some(*status_code),
        }
    }
}

// Verify the error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
    assert_send_sync::<NormalizeError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = TransportError::with_source("connection refused", io);

        assert_eq!(error.message(), "connection refused");
        assert!(error.source().is_some());
        assert!(TransportError::new("timeout").source().is_none());
    }

    #[test]
    fn test_normalize_error_transport_is_transparent() {
        let error = NormalizeError::from(TransportError::new("connection refused"));

        assert_eq!(error.to_string(), "connection refused");
        assert_eq!(error.kind(), ErrorKind::TransportFailure);
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_api_error_message_includes_code_target_and_status() {
        let error = NormalizeError::Api {
            code: "5".to_string(),
            message: "bad arg".to_string(),
            target: "name".to_string(),
            status_code: 400,
        };
        let message = error.to_string();

        assert!(message.contains("code 5"));
        assert!(message.contains("bad arg"));
        assert!(message.contains("name"));
        assert!(message.contains("400"));
        assert_eq!(error.kind(), ErrorKind::ApiError);
    }

    #[test]
    fn test_malformed_body_exposes_decode_error_as_source() {
        let error = NormalizeError::MalformedBody {
            status_code: 502,
            source: DecodeError::BadJson {
                reason: "expected value at line 1 column 1".to_string(),
            },
        };

        assert_eq!(error.kind(), ErrorKind::MalformedBody);
        assert_eq!(error.status_code(), Some(502));
        assert!(error.source().is_some());
        assert!(error.to_string().contains("502"));
    }

    #[test]
    fn test_bad_structure_reports_found_type() {
        let error = DecodeError::bad_structure("records", "an array of objects", &json!("nope"));

        assert_eq!(
            error,
            DecodeError::BadStructure {
                field: "records".to_string(),
                expected: "an array of objects",
                found: "string",
            }
        );
        assert!(error.to_string().contains("records"));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
