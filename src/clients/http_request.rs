//! Requests to the Ansible Forms API.
//!
//! Every call the provider makes is a method, a path below `/api`, optional
//! query parameters and, for POST and PATCH, a JSON document such as the
//! `{"formName": ..., "extravars": {...}}` payload that launches a job.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Ansible Forms API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Reads forms, jobs and other objects.
    Get,
    /// Launches jobs and creates objects.
    Post,
    /// Updates objects, e.g. approving or aborting a job.
    Patch,
    /// Removes objects.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method carry a JSON body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
        })
    }
}

/// One request to the Ansible Forms API.
///
/// POST and PATCH always carry a JSON body; GET and DELETE never do. The
/// typed constructors guarantee this, [`HttpRequest::new`] checks it.
///
/// # Example
///
/// ```rust
/// use ansible_forms::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let launch = HttpRequest::post("job", json!({"formName": "Demo", "extravars": {}}));
/// assert_eq!(launch.method(), HttpMethod::Post);
///
/// let poll = HttpRequest::get("job/42").query_param("fields", "status");
/// assert_eq!(poll.query(), [("fields".to_string(), "status".to_string())]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl HttpRequest {
    /// Creates a request, checking that the body matches the method.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] for POST or PATCH
    /// without a body, and [`InvalidHttpRequestError::UnexpectedBody`] for GET
    /// or DELETE with one.
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        body: Option<Value>,
    ) -> Result<Self, InvalidHttpRequestError> {
        match (method.has_body(), body.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: method.to_string(),
            }),
            (false, true) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: method.to_string(),
            }),
            _ => Ok(Self {
                method,
                path: path.into(),
                query: Vec::new(),
                body,
            }),
        }
    }

    /// A GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::without_body(HttpMethod::Get, path)
    }

    /// A DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::without_body(HttpMethod::Delete, path)
    }

    /// A POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::with_body(HttpMethod::Post, path, body)
    }

    /// A PATCH request with a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::with_body(HttpMethod::Patch, path, body)
    }

    fn without_body(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_body(method: HttpMethod, path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::without_body(method, path)
        }
    }

    /// Appends one query parameter. Parameters are sent in insertion order.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn with_query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The path below the API base, without a leading `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}
