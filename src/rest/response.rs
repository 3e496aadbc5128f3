//! Uniform response types produced by the response normalizer.
//!
//! Every REST call, whatever shape the endpoint answers with, ends up as a
//! [`NormalizedResponse`]: a list of records, optional job tracking data, the
//! embedded API error (if any), and an [`ErrorKind`] classifying the outcome.
//!
//! # Example
//!
//! ```rust
//! use ansible_forms::rest::{ErrorKind, NormalizedResponse};
//!
//! let response = NormalizedResponse::empty(200);
//! assert_eq!(response.record_count, 0);
//! assert!(response.records.is_empty());
//! assert_eq!(response.error_kind, ErrorKind::None);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single item of domain data returned by the API.
///
/// Records are kept as ordered JSON maps so that two decodes of the same body
/// always compare equal.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The structured error object an API may embed in its response body.
///
/// The API reports `{"error": {"code": "...", "message": "...", "target": "..."}}`.
/// A missing object, or a code of `""` or `"0"`, means no error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// API-specific error code.
    pub code: String,
    /// Human readable error message.
    pub message: String,
    /// The field or object the error refers to, if reported.
    pub target: String,
}

impl ApiErrorDetail {
    /// Returns `true` if this object reports an actual error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ansible_forms::rest::ApiErrorDetail;
    ///
    /// assert!(!ApiErrorDetail::default().is_error());
    ///
    /// let zero = ApiErrorDetail { code: "0".to_string(), ..Default::default() };
    /// assert!(!zero.is_error());
    ///
    /// let real = ApiErrorDetail { code: "5".to_string(), ..Default::default() };
    /// assert!(real.is_error());
    /// ```
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.code.is_empty() && self.code != "0"
    }
}

/// Classification of a normalized response.
///
/// Exactly one kind applies to each response. The classifier checks them in
/// the order transport, body, API error, status code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request succeeded.
    #[default]
    None,
    /// The request never produced a usable HTTP response.
    TransportFailure,
    /// The body was not valid JSON, or did not have the expected structure.
    MalformedBody,
    /// The body carried an error object with a non-empty, non-`"0"` code.
    ApiError,
    /// The status code was outside `200..300` and no error object was present.
    StatusCodeError,
}

impl ErrorKind {
    /// Returns the short tag used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::TransportFailure => "http",
            Self::MalformedBody => "bad_response_decode",
            Self::ApiError => "rest_error",
            Self::StatusCodeError => "statuscode_error",
        }
    }

    /// Returns `true` for every kind except [`ErrorKind::None`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The uniform result of a REST call.
///
/// After normalization `record_count == records.len()` always holds.
/// `overflow` fields of the raw body are not kept: they are either promoted to
/// a single record or dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedResponse {
    /// Number of records in `records`.
    pub record_count: usize,
    /// The records returned by the API, possibly empty.
    pub records: Vec<Record>,
    /// The embedded API error, all fields empty if none was reported.
    pub api_error: ApiErrorDetail,
    /// HTTP status code, 0 if no response was received.
    pub status_code: u16,
    /// Transport error text, empty if the transport succeeded.
    pub transport_error: String,
    /// Outcome classification.
    pub error_kind: ErrorKind,
    /// Job tracking object for asynchronous operations.
    pub job: Option<Record>,
    /// Job tracking objects for asynchronous operations.
    pub jobs: Option<Vec<Record>>,
}

impl NormalizedResponse {
    /// Creates a response with no records, no error and the given status.
    #[must_use]
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    /// Returns the first record, if any.
    #[must_use]
    pub fn first_record(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success_status(&self) -> bool {
        self.status_code >= 200 && self.status_code <= 299
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_response_has_defaults() {
        let response = NormalizedResponse::empty(204);

        assert_eq!(response.status_code, 204);
        assert_eq!(response.record_count, 0);
        assert!(response.records.is_empty());
        assert_eq!(response.api_error, ApiErrorDetail::default());
        assert!(response.transport_error.is_empty());
        assert_eq!(response.error_kind, ErrorKind::None);
        assert!(response.job.is_none());
        assert!(response.jobs.is_none());
    }

    #[test]
    fn test_api_error_detail_zero_code_is_not_an_error() {
        let detail = ApiErrorDetail {
            code: "0".to_string(),
            message: "ok".to_string(),
            target: String::new(),
        };
        assert!(!detail.is_error());
    }

    #[test]
    fn test_api_error_detail_deserializes_from_json() {
        let detail: ApiErrorDetail =
            serde_json::from_value(json!({"code": "5", "message": "bad arg", "target": "name"}))
                .unwrap();

        assert_eq!(detail.code, "5");
        assert_eq!(detail.message, "bad arg");
        assert_eq!(detail.target, "name");
        assert!(detail.is_error());
    }

    #[test]
    fn test_error_kind_tags() {
        assert_eq!(ErrorKind::None.as_str(), "");
        assert_eq!(ErrorKind::TransportFailure.to_string(), "http");
        assert_eq!(ErrorKind::MalformedBody.to_string(), "bad_response_decode");
        assert_eq!(ErrorKind::ApiError.to_string(), "rest_error");
        assert_eq!(ErrorKind::StatusCodeError.to_string(), "statuscode_error");
    }

    #[test]
    fn test_error_kind_is_error() {
        assert!(!ErrorKind::None.is_error());
        assert!(ErrorKind::TransportFailure.is_error());
        assert!(ErrorKind::MalformedBody.is_error());
        assert!(ErrorKind::ApiError.is_error());
        assert!(ErrorKind::StatusCodeError.is_error());
    }

    #[test]
    fn test_success_status_range() {
        assert!(NormalizedResponse::empty(200).is_success_status());
        assert!(NormalizedResponse::empty(299).is_success_status());
        assert!(!NormalizedResponse::empty(199).is_success_status());
        assert!(!NormalizedResponse::empty(300).is_success_status());
        assert!(!NormalizedResponse::empty(0).is_success_status());
    }
}
