//! REST API client for Ansible Forms.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient). Every answer is normalized by
//! the [`ResponseNormalizer`](crate::rest::ResponseNormalizer), so resources
//! and data sources get the same response shape whatever endpoint they call.
//!
//! # Overview
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `patch()`, `delete()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use ansible_forms::{ProviderConfig, RestClient};
//!
//! let config: ProviderConfig = r#"{
//!     "connection_profiles": [
//!         {"name": "cluster1", "hostname": "forms.example.com", "username": "admin", "password": "secret"}
//!     ]
//! }"#.parse()?;
//!
//! let client = RestClient::new(&config, "cluster1")?;
//! let outcome = client.get("job/42", None).await?;
//! let (status_code, response, error) = outcome.into_parts();
//! ```
//!
//! # Path Normalization
//!
//! Leading slashes are stripped: `/job/42` -> `job/42`. A path that is empty
//! after stripping is rejected with [`RestError::InvalidPath`].
//!
//! # Retry Behavior
//!
//! Requests are attempted exactly once. Job polling is left to the caller.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
