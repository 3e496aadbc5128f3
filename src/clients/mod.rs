//! HTTP client types for Ansible Forms API communication.
//!
//! This module provides the transport layer: it sends authenticated requests
//! to one management endpoint and hands back whatever came back as a
//! [`RawTransportResult`](crate::rest::RawTransportResult).
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for one connection profile
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`rest::RestClient`]: Higher-level client returning normalized responses
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use ansible_forms::clients::{HttpClient, HttpRequest};
//!
//! let client = HttpClient::new(&profile, None)?;
//!
//! let raw = client.send(&HttpRequest::get("job/42")).await;
//! ```
//!
//! # Failures
//!
//! Network failures do not surface as errors from [`HttpClient::send`]. They
//! are recorded in the transport result with status code 0, so the normalizer
//! can classify them like every other outcome.

mod errors;
mod http_client;
mod http_request;
pub mod rest;

pub use errors::{HttpClientBuildError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
