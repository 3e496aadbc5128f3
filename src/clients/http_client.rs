//! HTTP client for Ansible Forms API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to one Ansible Forms management endpoint. The client never
//! retries and never classifies responses: everything the server (or the
//! network) produced is handed back as a [`RawTransportResult`] for the
//! response normalizer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::clients::errors::HttpClientBuildError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::config::{ConnectionProfile, Password, Username};
use crate::rest::RawTransportResult;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Ansible Forms API.
///
/// The client handles:
/// - Base URI construction (`https://{hostname}/api`)
/// - Default headers including User-Agent and Accept
/// - Basic authentication from the connection profile
/// - Certificate validation according to `validate_certs`
/// - Limiting in-flight requests to `max_concurrent_requests`
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ansible_forms::clients::{HttpClient, HttpRequest};
///
/// let client = HttpClient::new(&profile, None)?;
///
/// let request = HttpRequest::get("job/42");
///
/// let raw = client.send(&request).await;
/// println!("status {}", raw.status_code);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://forms.example.com/api`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    username: Username,
    password: Password,
    /// Caps the number of in-flight requests when the profile sets a limit.
    limiter: Option<Arc<Semaphore>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given connection profile.
    ///
    /// # Arguments
    ///
    /// * `profile` - Host, credentials and TLS settings of the endpoint
    /// * `user_agent_prefix` - Optional prefix for the User-Agent header
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientBuildError`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use ansible_forms::{ConnectionProfile, Hostname, Password, Username};
    /// use ansible_forms::clients::HttpClient;
    ///
    /// let profile = ConnectionProfile::builder()
    ///     .hostname(Hostname::new("forms.example.com").unwrap())
    ///     .username(Username::new("admin").unwrap())
    ///     .password(Password::new("secret").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&profile, None).unwrap();
    /// assert_eq!(client.base_uri(), "https://forms.example.com/api");
    /// ```
    pub fn new(
        profile: &ConnectionProfile,
        user_agent_prefix: Option<&str>,
    ) -> Result<Self, HttpClientBuildError> {
        let base_uri = format!("https://{}/api", profile.hostname().as_ref());

        // Build User-Agent header
        let user_agent_prefix =
            user_agent_prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Ansible Forms REST Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!profile.validate_certs())
            .build()
            .map_err(|source| HttpClientBuildError {
                hostname: profile.hostname().as_ref().to_string(),
                source,
            })?;

        let limiter = match profile.max_concurrent_requests() {
            0 => None,
            max => Some(Arc::new(Semaphore::new(max))),
        };

        Ok(Self {
            client,
            base_uri,
            default_headers,
            username: profile.username().clone(),
            password: profile.password().clone(),
            limiter,
        })
    }

    /// Replaces the base URI, e.g. to go through a proxy.
    ///
    /// Trailing slashes are removed.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        let base_uri = base_uri.into();
        self.base_uri = base_uri.trim_end_matches('/').to_string();
        self
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Ansible Forms API.
    ///
    /// A failure to reach the server is not an error here: it comes back as a
    /// [`RawTransportResult`] with `status_code` 0 and `transport_error` set.
    /// If the body cannot be read, the status code is kept alongside the
    /// transport error.
    pub async fn send(&self, request: &HttpRequest) -> RawTransportResult {
        let method = request.method();
        let url = format!("{}/{}", self.base_uri, request.path());

        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        req_builder = req_builder.basic_auth(self.username.as_ref(), Some(self.password.as_ref()));

        if !request.query().is_empty() {
            req_builder = req_builder.query(request.query());
        }

        if let Some(body) = request.body() {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        // Held until the body has been read
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(
                    method = %method,
                    url = %url,
                    error = %error,
                    "Request to Ansible Forms failed before a response was received"
                );
                return RawTransportResult::failed(0, error.into());
            }
        };

        let status_code = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => RawTransportResult::response(status_code, body),
            Err(error) => {
                tracing::debug!(
                    method = %method,
                    url = %url,
                    status_code,
                    error = %error,
                    "Failed to read Ansible Forms response body"
                );
                RawTransportResult::failed(status_code, error.into())
            }
        }
    }
}
