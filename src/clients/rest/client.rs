//! REST client implementation for the Ansible Forms API.
//!
//! This module provides the [`RestClient`] type, which sends requests through
//! an [`HttpClient`] and runs every answer through the [`ResponseNormalizer`].

use std::collections::HashMap;

use tracing::Instrument;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::config::ProviderConfig;
use crate::rest::{NormalizeOutcome, NormalizerPolicy, Record, ResponseNormalizer};

/// REST API client for Ansible Forms.
///
/// Provides convenient methods (`get`, `post`, `patch`, `delete`) that
/// return a [`NormalizeOutcome`]: the normalized response plus its
/// classified error, if any.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ansible_forms::{ProviderConfig, RestClient};
///
/// let config: ProviderConfig = provider_block.parse()?;
/// let client = RestClient::new(&config, "cluster1")?;
///
/// // GET request
/// let outcome = client.get("job/42", None).await?;
/// if let Some(error) = outcome.error {
///     return Err(error.into());
/// }
///
/// // POST request with body
/// let body = serde_json::json!({"formName": "Demo", "extravars": {}});
/// let outcome = client.post("job", body, None).await?;
/// let job_id = outcome.response.first_record().and_then(|r| r.get("id"));
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    normalizer: ResponseNormalizer,
    /// Name of the connection profile, recorded on request spans.
    profile: Option<String>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a REST client for a named connection profile.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Config`] if the profile is not defined, or
    /// [`RestError::ClientBuild`] if the HTTP client cannot be created.
    pub fn new(config: &ProviderConfig, profile_name: &str) -> Result<Self, RestError> {
        let profile = config.profile(profile_name)?;
        let http_client = HttpClient::new(profile, config.user_agent_prefix())?;

        tracing::debug!(
            profile = profile_name,
            base_uri = http_client.base_uri(),
            "Created Ansible Forms REST client"
        );

        Ok(Self {
            http_client,
            normalizer: ResponseNormalizer::new(*config.normalizer_policy()),
            profile: Some(profile_name.trim().to_string()),
        })
    }

    /// Creates a REST client from an existing [`HttpClient`].
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient, policy: NormalizerPolicy) -> Self {
        Self {
            http_client,
            normalizer: ResponseNormalizer::new(policy),
            profile: None,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the response normalizer.
    #[must_use]
    pub const fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The REST API path (e.g., "job/42", "forms")
    /// * `query` - Optional query parameters
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Server and network failures are reported in the returned outcome.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<NormalizeOutcome, RestError> {
        self.request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<NormalizeOutcome, RestError> {
        self.request(HttpMethod::Post, path, Some(body), query).await
    }

    /// Sends a PATCH request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<NormalizeOutcome, RestError> {
        self.request(HttpMethod::Patch, path, Some(body), query).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<NormalizeOutcome, RestError> {
        self.request(HttpMethod::Delete, path, None, query).await
    }

    /// Fetches a resource that may or may not exist.
    ///
    /// Returns `None` when no record came back and the single record
    /// otherwise. A "show" endpoint answering with the bare resource counts as
    /// one record.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Response`] if the response was classified as an
    /// error, and [`RestError::UnexpectedRecordCount`] if more than one record
    /// came back.
    pub async fn get_zero_or_one_record(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<Option<Record>, RestError> {
        let response = self.get(path, query).await?.into_result()?;

        match response.record_count {
            0 => Ok(None),
            1 => Ok(response.records.into_iter().next()),
            count => Err(RestError::UnexpectedRecordCount {
                path: normalize_path(path)?,
                count,
            }),
        }
    }

    /// Sends a request with any method and normalizes the answer.
    ///
    /// POST and PATCH need a body; GET and DELETE must not have one.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid, and
    /// [`RestError::InvalidRequest`] if the body does not fit the method.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<NormalizeOutcome, RestError> {
        let normalized_path = normalize_path(path)?;

        let span = tracing::info_span!(
            "rest_request",
            method = %method,
            path = %normalized_path,
            profile = tracing::field::Empty,
        );
        if let Some(profile) = &self.profile {
            span.record("profile", profile.as_str());
        }

        let mut request = HttpRequest::new(method, normalized_path, body)?;
        if let Some(query_params) = query {
            request = request.with_query(query_params);
        }

        let raw = self
            .http_client
            .send(&request)
            .instrument(span.clone())
            .await;

        Ok(self.normalizer.normalize(&span, raw))
    }
}

/// Normalizes a REST API path.
///
/// Leading `/` characters are stripped; an empty result is rejected.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(path.to_string())
}
