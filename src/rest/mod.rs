//! REST response normalization.
//!
//! The Ansible Forms API answers with several response shapes: a `records`
//! list, a bare object holding one resource's fields, job tracking objects,
//! a structured `error` object, or just a status code. This module maps all of
//! them onto one [`NormalizedResponse`] so callers have a single code path.
//!
//! # Pipeline
//!
//! - **Transport gate**: a transport error yields an empty response tagged
//!   [`ErrorKind::TransportFailure`]; the body is not looked at.
//! - **Structural decoder**: [`parse_payload`] then [`StagedRecord::from_payload`]
//!   separate the known fields from the unrecognized overflow.
//! - **Shape reconciler**: [`StagedRecord::reconcile`] promotes the overflow to
//!   a single record when the response carries no records, per
//!   [`NormalizerPolicy`].
//! - **Error classifier**: [`classify`] checks the API error object first and
//!   the status code second.
//!
//! # Example
//!
//! ```rust
//! use ansible_forms::rest::{ErrorKind, ResponseNormalizer};
//! use tracing::Span;
//!
//! let normalizer = ResponseNormalizer::default();
//!
//! // A "show" endpoint returns the resource at the top level
//! let outcome = normalizer.decode(&Span::none(), 200, br#"{"name": "cluster1", "uuid": "abc"}"#, None);
//! assert_eq!(outcome.response.record_count, 1);
//! assert_eq!(outcome.response.records[0]["name"], "cluster1");
//!
//! // An error object wins over the status code
//! let outcome = normalizer.decode(
//!     &Span::none(),
//!     400,
//!     br#"{"error": {"code": "5", "message": "bad arg", "target": "name"}}"#,
//!     None,
//! );
//! assert_eq!(outcome.error_kind(), ErrorKind::ApiError);
//! assert!(outcome.error.unwrap().to_string().contains('5'));
//! ```

mod errors;
mod normalizer;
mod policy;
mod response;
mod staged;

// Public exports
pub use errors::{DecodeError, NormalizeError, TransportError};
pub use normalizer::{classify, NormalizeOutcome, RawTransportResult, ResponseNormalizer};
pub use policy::NormalizerPolicy;
pub use response::{ApiErrorDetail, ErrorKind, NormalizedResponse, Record};
pub use staged::{parse_payload, Payload, StagedRecord};
