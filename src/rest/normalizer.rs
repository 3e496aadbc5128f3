//! The response normalizer.
//!
//! [`ResponseNormalizer`] turns a raw transport result into a
//! [`NormalizeOutcome`] in four forward-only steps:
//!
//! 1. a transport error short-circuits the pipeline and the body is ignored,
//! 2. the body is parsed and staged ([`parse_payload`], [`StagedRecord::from_payload`]),
//! 3. the staged record is reconciled into a [`NormalizedResponse`],
//! 4. the response is classified by its API error object, then its status code.
//!
//! Diagnostics are emitted with `tracing` inside the span handed to each call,
//! so request context travels with the call rather than through global state.

use bytes::Bytes;
use tracing::Span;

use crate::rest::{
    parse_payload, ErrorKind, NormalizeError, NormalizedResponse, NormalizerPolicy, StagedRecord,
    TransportError,
};

/// What the transport layer produced for one request.
#[derive(Debug, Default)]
pub struct RawTransportResult {
    /// HTTP status code, 0 if no response was received.
    pub status_code: u16,
    /// The raw response body.
    pub body: Bytes,
    /// The transport failure, if any.
    pub transport_error: Option<TransportError>,
}

impl RawTransportResult {
    /// Creates a result for a received HTTP response.
    #[must_use]
    pub fn response(status_code: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status_code,
            body: body.into(),
            transport_error: None,
        }
    }

    /// Creates a result for a request that failed at the transport level.
    #[must_use]
    pub fn failed(status_code: u16, error: TransportError) -> Self {
        Self {
            status_code,
            body: Bytes::new(),
            transport_error: Some(error),
        }
    }
}

/// The outcome of normalizing one response.
///
/// `response` is always populated, with defaults on failure. `error` is
/// `Some` exactly when `response.error_kind` is not [`ErrorKind::None`].
#[derive(Debug)]
pub struct NormalizeOutcome {
    /// HTTP status code of the response, 0 if none was received.
    pub status_code: u16,
    /// The normalized response.
    pub response: NormalizedResponse,
    /// The classified error, if any.
    pub error: Option<NormalizeError>,
}

impl NormalizeOutcome {
    fn failure(response: NormalizedResponse, error: NormalizeError) -> Self {
        Self {
            status_code: response.status_code,
            response,
            error: Some(error),
        }
    }

    /// Returns `true` if no error was classified.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the classification of the response.
    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        self.response.error_kind
    }

    /// Converts the outcome into a `Result`, dropping the response on error.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NormalizeError`], if any.
    pub fn into_result(self) -> Result<NormalizedResponse, NormalizeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }

    /// Splits the outcome into status code, response and error.
    #[must_use]
    pub fn into_parts(self) -> (u16, NormalizedResponse, Option<NormalizeError>) {
        (self.status_code, self.response, self.error)
    }
}

/// Normalizes raw REST responses into [`NormalizedResponse`]s.
///
/// The normalizer holds only its [`NormalizerPolicy`]; every call is
/// independent, so a single instance can be shared across tasks.
///
/// # Example
///
/// ```rust
/// use ansible_forms::rest::{ErrorKind, ResponseNormalizer};
/// use tracing::Span;
///
/// let normalizer = ResponseNormalizer::default();
/// let outcome = normalizer.decode(
///     &Span::none(),
///     200,
///     br#"{"num_records": 2, "records": [{"name": "a"}, {"name": "b"}]}"#,
///     None,
/// );
///
/// assert!(outcome.is_ok());
/// assert_eq!(outcome.response.record_count, 2);
/// assert_eq!(outcome.error_kind(), ErrorKind::None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResponseNormalizer {
    policy: NormalizerPolicy,
}

// Verify the normalizer types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseNormalizer>();
    assert_send_sync::<NormalizeOutcome>();
    assert_send_sync::<RawTransportResult>();
};

impl ResponseNormalizer {
    /// Creates a normalizer with the given policy.
    #[must_use]
    pub const fn new(policy: NormalizerPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &NormalizerPolicy {
        &self.policy
    }

    /// Normalizes a [`RawTransportResult`].
    ///
    /// See [`decode`](Self::decode).
    #[must_use]
    pub fn normalize(&self, span: &Span, raw: RawTransportResult) -> NormalizeOutcome {
        self.decode(span, raw.status_code, &raw.body, raw.transport_error)
    }

    /// Decodes and classifies one response.
    ///
    /// Diagnostics are emitted inside `span`. This never fails: every input,
    /// including garbage, maps to an outcome.
    #[must_use]
    pub fn decode(
        &self,
        span: &Span,
        status_code: u16,
        body: &[u8],
        transport_error: Option<TransportError>,
    ) -> NormalizeOutcome {
        span.in_scope(|| self.decode_in_scope(status_code, body, transport_error))
    }

    fn decode_in_scope(
        &self,
        status_code: u16,
        body: &[u8],
        transport_error: Option<TransportError>,
    ) -> NormalizeOutcome {
        if let Some(error) = transport_error {
            tracing::error!(
                kind = %ErrorKind::TransportFailure,
                status_code,
                error = %error,
                "request failed before a response was received"
            );
            let response = NormalizedResponse {
                transport_error: error.to_string(),
                error_kind: ErrorKind::TransportFailure,
                ..NormalizedResponse::empty(status_code)
            };
            return NormalizeOutcome::failure(response, error.into());
        }

        let staged = match parse_payload(body, &self.policy).and_then(StagedRecord::from_payload) {
            Ok(staged) => staged,
            Err(source) => {
                tracing::error!(
                    kind = %ErrorKind::MalformedBody,
                    status_code,
                    error = %source,
                    body = %String::from_utf8_lossy(body),
                    "unable to decode response, this may be expected when the status code is >= 300"
                );
                let response = NormalizedResponse {
                    error_kind: ErrorKind::MalformedBody,
                    ..NormalizedResponse::empty(status_code)
                };
                return NormalizeOutcome::failure(
                    response,
                    NormalizeError::MalformedBody {
                        status_code,
                        source,
                    },
                );
            }
        };
        tracing::debug!(?staged, "staged response");

        let response = staged.reconcile(&self.policy, status_code);
        let (response, error) = classify(status_code, response);
        tracing::debug!(?response, "normalized response");

        NormalizeOutcome {
            status_code,
            response,
            error,
        }
    }
}

/// Classifies a reconciled response.
///
/// An API error object takes precedence over the status code: a response
/// with a non-2xx status and a real error code is an [`ErrorKind::ApiError`].
///
/// # Example
///
/// ```rust
/// use ansible_forms::rest::{classify, ErrorKind, NormalizedResponse};
///
/// let (response, error) = classify(503, NormalizedResponse::empty(503));
/// assert_eq!(response.error_kind, ErrorKind::StatusCodeError);
/// assert!(error.is_some());
/// ```
#[must_use]
pub fn classify(
    status_code: u16,
    mut response: NormalizedResponse,
) -> (NormalizedResponse, Option<NormalizeError>) {
    let error = if response.api_error.is_error() {
        Some(NormalizeError::Api {
            code: response.api_error.code.clone(),
            message: response.api_error.message.clone(),
            target: response.api_error.target.clone(),
            status_code,
        })
    } else if !(200..300).contains(&status_code) {
        Some(NormalizeError::StatusCode { status_code })
    } else {
        None
    };

    if let Some(error) = &error {
        response.error_kind = error.kind();
        tracing::error!(
            kind = %response.error_kind,
            status_code,
            error = %error,
            response = ?response,
            "response classified as an error"
        );
    } else {
        response.error_kind = ErrorKind::None;
    }

    (response, error)
}
