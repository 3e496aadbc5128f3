//! HTTP-specific error types.
//!
//! Failures while talking to the server are not errors at this level: they
//! are captured as a [`TransportError`] inside the
//! [`RawTransportResult`](crate::rest::RawTransportResult) and classified by
//! the response normalizer. The errors here only cover what goes wrong before
//! anything is sent:
//!
//! - [`InvalidHttpRequestError`]: When a request body does not fit its method
//! - [`HttpClientBuildError`]: When the underlying HTTP client cannot be created

use thiserror::Error;

use crate::rest::TransportError;

/// A request whose body does not fit its method.
///
/// # Example
///
/// ```rust
/// use ansible_forms::clients::{HttpMethod, HttpRequest};
///
/// let error = HttpRequest::new(HttpMethod::Post, "job", None).unwrap_err();
/// assert_eq!(error.to_string(), "A post request needs a JSON body.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// POST or PATCH without a body.
    #[error("A {method} request needs a JSON body.")]
    MissingBody {
        /// The HTTP method.
        method: String,
    },

    /// GET or DELETE with a body.
    #[error("A {method} request cannot carry a body.")]
    UnexpectedBody {
        /// The HTTP method.
        method: String,
    },
}

/// Error returned when the HTTP client cannot be created.
#[derive(Debug, Error)]
#[error("Failed to create HTTP client for {hostname}: {source}")]
pub struct HttpClientBuildError {
    /// The host the client was meant for.
    pub hostname: String,
    /// The underlying reqwest error.
    #[source]
    pub source: reqwest::Error,
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::with_source(message, error)
    }
}
