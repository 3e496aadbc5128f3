//! # Ansible Forms REST
//!
//! The REST layer of the Ansible Forms Terraform provider: provider
//! configuration, an authenticated HTTP client, and the response normalizer
//! that turns every answer of the Ansible Forms API into one uniform shape.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ProviderConfig`] and [`ProviderConfigBuilder`]
//! - Validated newtypes for connection profile values
//! - An async HTTP client with basic authentication, see [`clients`]
//! - A response normalizer and error classifier, see [`rest`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ansible_forms::ProviderConfig;
//!
//! let config: ProviderConfig = r#"{
//!     "job_completion_timeout": 300,
//!     "connection_profiles": [
//!         {"name": "cluster1", "hostname": "forms.example.com", "username": "admin", "password": "secret"}
//!     ]
//! }"#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(config.connection_profiles().len(), 1);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use ansible_forms::{ProviderConfig, RestClient};
//!
//! let client = RestClient::new(&config, "cluster1")?;
//!
//! let outcome = client.get("job/42", None).await?;
//! match outcome.error {
//!     None => println!("{} record(s)", outcome.response.record_count),
//!     Some(error) => println!("{} failed: {}", error.kind(), error),
//! }
//! ```
//!
//! ## Normalizing Responses Directly
//!
//! ```rust
//! use ansible_forms::rest::{ErrorKind, ResponseNormalizer};
//! use tracing::Span;
//!
//! let outcome = ResponseNormalizer::default().decode(&Span::none(), 503, b"{}", None);
//! assert_eq!(outcome.error_kind(), ErrorKind::StatusCodeError);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Total normalization**: Every response, including garbage, maps to an outcome

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ConnectionProfile, ConnectionProfileBuilder, Hostname, Password, ProfileName,
    ProviderConfig, ProviderConfigBuilder, Username, DEFAULT_JOB_COMPLETION_TIMEOUT,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpClientBuildError, HttpMethod, HttpRequest, InvalidHttpRequestError,
    RestClient, RestError,
};

// Re-export normalizer types
pub use rest::{
    ErrorKind, NormalizeError, NormalizeOutcome, NormalizedResponse, NormalizerPolicy,
    ResponseNormalizer,
};
