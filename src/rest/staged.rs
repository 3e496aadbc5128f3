//! Structural decoding of response bodies.
//!
//! Decoding happens in two passes. [`parse_payload`] turns the raw bytes into a
//! generic JSON object. [`StagedRecord::from_payload`] then pulls the known
//! fields (`num_records`, `records`, `error`, `job`, `jobs`) out by name and
//! keeps everything else as overflow. [`StagedRecord::reconcile`] finally
//! applies the single implicit record rule and produces the uniform
//! [`NormalizedResponse`].

use serde_json::Value;

use crate::rest::errors::{json_type_name, DecodeError};
use crate::rest::{ApiErrorDetail, ErrorKind, NormalizedResponse, NormalizerPolicy, Record};

/// A parsed but uninterpreted response body.
pub type Payload = serde_json::Map<String, Value>;

const NUM_RECORDS: &str = "num_records";
const RECORDS: &str = "records";
const ERROR: &str = "error";
const JOB: &str = "job";
const JOBS: &str = "jobs";

/// Parses a response body into a JSON object.
///
/// # Errors
///
/// Returns [`DecodeError::BadJson`] if the body is not valid JSON or its
/// top-level value is not an object. An empty body is bad JSON unless
/// [`NormalizerPolicy::empty_body_as_object`] is set.
///
/// # Example
///
/// ```rust
/// use ansible_forms::rest::{parse_payload, DecodeError, NormalizerPolicy};
///
/// let policy = NormalizerPolicy::default();
/// let payload = parse_payload(br#"{"name": "a"}"#, &policy).unwrap();
/// assert_eq!(payload["name"], "a");
///
/// assert!(matches!(
///     parse_payload(b"[1, 2]", &policy),
///     Err(DecodeError::BadJson { .. })
/// ));
/// ```
pub fn parse_payload(body: &[u8], policy: &NormalizerPolicy) -> Result<Payload, DecodeError> {
    if policy.empty_body_as_object() && body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DecodeError::BadJson {
            reason: format!(
                "expected an object at the top level, found {}",
                json_type_name(&other)
            ),
        }),
        Err(e) => Err(DecodeError::BadJson {
            reason: e.to_string(),
        }),
    }
}

/// Intermediate form of a response body.
///
/// Known fields are decoded into typed members. `overflow` holds exactly the
/// top-level keys that were not consumed by them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StagedRecord {
    /// The `num_records` value reported by the API, 0 if absent.
    pub record_count: usize,
    /// The `records` list, empty if absent.
    pub records: Vec<Record>,
    /// The `error` object, all fields empty if absent.
    pub api_error: ApiErrorDetail,
    /// The `job` object, if present.
    pub job: Option<Record>,
    /// The `jobs` list, if present.
    pub jobs: Option<Vec<Record>>,
    /// All remaining top-level fields.
    pub overflow: Payload,
}

impl StagedRecord {
    /// Extracts the known fields from a parsed payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BadStructure`] if a known field is present but
    /// has an incompatible shape, e.g. `records` is not an array of objects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ansible_forms::rest::StagedRecord;
    /// use serde_json::json;
    ///
    /// let payload = json!({"num_records": 1, "records": [{"name": "a"}], "_links": {}});
    /// let staged = StagedRecord::from_payload(payload.as_object().unwrap().clone()).unwrap();
    ///
    /// assert_eq!(staged.record_count, 1);
    /// assert_eq!(staged.records.len(), 1);
    /// assert!(staged.overflow.contains_key("_links"));
    /// ```
    pub fn from_payload(mut payload: Payload) -> Result<Self, DecodeError> {
        let record_count = payload
            .remove(NUM_RECORDS)
            .map_or(Ok(0), decode_record_count)?;
        let records = payload
            .remove(RECORDS)
            .map_or_else(|| Ok(Vec::new()), |value| decode_object_list(RECORDS, value))?;
        let api_error = payload
            .remove(ERROR)
            .map_or_else(|| Ok(ApiErrorDetail::default()), decode_api_error)?;
        let job = match payload.remove(JOB) {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => return Err(DecodeError::bad_structure(JOB, "an object", &other)),
        };
        let jobs = match payload.remove(JOBS) {
            None | Some(Value::Null) => None,
            Some(value) => Some(decode_object_list(JOBS, value)?),
        };

        for key in case_mismatched_fields(&payload) {
            tracing::debug!(
                field = key,
                "response field only matches a known field ignoring case, keeping it as overflow"
            );
        }

        Ok(Self {
            record_count,
            records,
            api_error,
            job,
            jobs,
            overflow: payload,
        })
    }

    /// Applies the single implicit record rule and builds the final response.
    ///
    /// When no records were reported and the overflow is large enough for
    /// `policy`, the overflow becomes the only record. The resulting
    /// `record_count` always equals the number of records. The overflow is
    /// dropped otherwise.
    #[must_use]
    pub fn reconcile(self, policy: &NormalizerPolicy, status_code: u16) -> NormalizedResponse {
        let Self {
            record_count,
            mut records,
            api_error,
            job,
            jobs,
            overflow,
        } = self;

        if record_count == 0 && records.is_empty() && policy.promotes(overflow.len()) {
            tracing::debug!(
                fields = overflow.len(),
                "promoting top-level fields to a single record"
            );
            records.push(overflow);
        } else if record_count != records.len() {
            tracing::debug!(
                reported = record_count,
                actual = records.len(),
                "num_records disagrees with records, using the records count"
            );
        }

        NormalizedResponse {
            record_count: records.len(),
            records,
            api_error,
            status_code,
            transport_error: String::new(),
            error_kind: ErrorKind::None,
            job,
            jobs,
        }
    }
}

/// Reads `num_records`. A zero or negative count means no count was reported.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn decode_record_count(value: Value) -> Result<usize, DecodeError> {
    let count = match &value {
        Value::Null => Some(0),
        Value::Number(number) => match (number.as_u64(), number.as_i64()) {
            (Some(n), _) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            (None, Some(_)) => Some(0),
            // Fractional counts are truncated.
            (None, None) => number.as_f64().map(|f| f.max(0.0) as usize),
        },
        _ => None,
    };

    count.ok_or_else(|| DecodeError::bad_structure(NUM_RECORDS, "an integer", &value))
}

/// Overflow keys that only differ from a known field by case.
fn case_mismatched_fields(overflow: &Payload) -> impl Iterator<Item = &str> {
    overflow.keys().map(String::as_str).filter(|key| {
        [NUM_RECORDS, RECORDS, ERROR, JOB, JOBS]
            .iter()
            .any(|known| key != known && key.eq_ignore_ascii_case(known))
    })
}

fn decode_object_list(field: &str, value: Value) -> Result<Vec<Record>, DecodeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(DecodeError::bad_structure(
                    format!("{field}[{index}]"),
                    "an object",
                    &other,
                )),
            })
            .collect(),
        other => Err(DecodeError::bad_structure(
            field,
            "an array of objects",
            &other,
        )),
    }
}

fn decode_api_error(value: Value) -> Result<ApiErrorDetail, DecodeError> {
    match value {
        Value::Null => Ok(ApiErrorDetail::default()),
        Value::Object(mut map) => Ok(ApiErrorDetail {
            code: take_string(&mut map, "code")?,
            message: take_string(&mut map, "message")?,
            target: take_string(&mut map, "target")?,
        }),
        other => Err(DecodeError::bad_structure(ERROR, "an object", &other)),
    }
}

fn take_string(map: &mut Payload, key: &str) -> Result<String, DecodeError> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(DecodeError::bad_structure(
            format!("{ERROR}.{key}"),
            "a string",
            &other,
        )),
    }
}
