//! REST-specific error types for the Ansible Forms client.
//!
//! A [`RestError`] only describes problems on the client side: the client could
//! not be created, the path or request was invalid, or a helper expected a
//! different record count. Whatever the server answered is reported through
//! the [`NormalizeOutcome`](crate::rest::NormalizeOutcome) instead, and is
//! surfaced as [`RestError::Response`] only by helpers that need a successful
//! response.
//!
//! # Example
//!
//! ```rust,ignore
//! use ansible_forms::clients::rest::{RestClient, RestError};
//!
//! match client.get_zero_or_one_record("forms/demo", None).await {
//!     Ok(Some(record)) => println!("Form: {:?}", record),
//!     Ok(None) => println!("No such form"),
//!     Err(RestError::Response(e)) => println!("Ansible Forms said: {}", e),
//!     Err(e) => println!("Client error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpClientBuildError, InvalidHttpRequestError};
use crate::error::ConfigError;
use crate::rest::NormalizeError;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use ansible_forms::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid.
    ///
    /// This error is returned when a path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// The request failed validation before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The response was classified as an error.
    #[error(transparent)]
    Response(#[from] NormalizeError),

    /// More records were returned than the caller allows.
    #[error("Expected at most one record from {path}, got {count}")]
    UnexpectedRecordCount {
        /// The normalized request path.
        path: String,
        /// The number of records returned.
        count: usize,
    },

    /// The provider configuration does not allow creating the client.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error(transparent)]
    ClientBuild(#[from] HttpClientBuildError),
}

// Verify RestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestError>();
};
