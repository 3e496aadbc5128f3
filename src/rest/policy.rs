//! Tunables for the response normalizer.

/// Policy controlling the shape heuristics of the normalizer.
///
/// Single-resource endpoints return the resource's fields at the top level
/// instead of wrapping them in `records`. The normalizer promotes those
/// unrecognized top-level fields ("overflow") to one implicit record when
/// there are at least [`min_overflow_keys_for_promotion`] of them. The
/// default of 2 keeps a lone `_links` self reference from being mistaken for a
/// record.
///
/// [`min_overflow_keys_for_promotion`]: NormalizerPolicy::min_overflow_keys_for_promotion
///
/// # Example
///
/// ```rust
/// use ansible_forms::rest::NormalizerPolicy;
///
/// let policy = NormalizerPolicy::default();
/// assert_eq!(policy.min_overflow_keys_for_promotion(), 2);
/// assert!(!policy.empty_body_as_object());
///
/// let relaxed = NormalizerPolicy::default()
///     .with_min_overflow_keys_for_promotion(1)
///     .with_empty_body_as_object(true);
/// assert_eq!(relaxed.min_overflow_keys_for_promotion(), 1);
/// assert!(relaxed.empty_body_as_object());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizerPolicy {
    min_overflow_keys_for_promotion: usize,
    empty_body_as_object: bool,
}

impl NormalizerPolicy {
    /// Default overflow size at which fields are promoted to a record.
    pub const DEFAULT_MIN_OVERFLOW_KEYS: usize = 2;

    /// Creates the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_overflow_keys_for_promotion: Self::DEFAULT_MIN_OVERFLOW_KEYS,
            empty_body_as_object: false,
        }
    }

    /// Sets the minimum number of overflow keys that triggers promotion.
    ///
    /// Values below 1 are raised to 1: an empty overflow is never a record.
    #[must_use]
    pub const fn with_min_overflow_keys_for_promotion(mut self, keys: usize) -> Self {
        self.min_overflow_keys_for_promotion = if keys == 0 { 1 } else { keys };
        self
    }

    /// Treat an empty (or whitespace only) body as `{}` instead of bad JSON.
    #[must_use]
    pub const fn with_empty_body_as_object(mut self, enabled: bool) -> Self {
        self.empty_body_as_object = enabled;
        self
    }

    /// Returns the minimum number of overflow keys that triggers promotion.
    #[must_use]
    pub const fn min_overflow_keys_for_promotion(&self) -> usize {
        self.min_overflow_keys_for_promotion
    }

    /// Returns whether an empty body decodes as an empty object.
    #[must_use]
    pub const fn empty_body_as_object(&self) -> bool {
        self.empty_body_as_object
    }

    /// Returns `true` if an overflow of `overflow_len` keys should become a record.
    #[must_use]
    pub const fn promotes(&self, overflow_len: usize) -> bool {
        overflow_len >= self.min_overflow_keys_for_promotion
    }
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self::new()
    }
}
