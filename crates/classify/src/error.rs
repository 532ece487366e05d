//! Error types for the rainmap-classify crate.

/// Error type for all fallible operations in the rainmap-classify crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    /// Returned when a threshold is NaN, or infinite anywhere other than a
    /// leading `-∞` or trailing `+∞` sentinel.
    #[error("non-finite threshold {value} at position {index}")]
    NonFiniteThreshold {
        /// Position in the thresholds as given.
        index: usize,
        /// The offending threshold.
        value: f64,
    },

    /// Returned when thresholds are not strictly ascending.
    #[error("thresholds must be strictly ascending: {previous} then {value} at position {index}")]
    NotAscending {
        /// Position in the thresholds as given.
        index: usize,
        /// The threshold before the offending one.
        previous: f64,
        /// The offending threshold.
        value: f64,
    },

    /// Returned when no finite boundary remains after stripping sentinels.
    #[error("at least one interior threshold is required")]
    NoInteriorThresholds,

    /// Returned when the scheme would exceed the 255 classes a `u8` can label.
    #[error("too many classes: {n_classes} (maximum 255)")]
    TooManyClasses {
        /// Number of classes the thresholds define.
        n_classes: usize,
    },

    /// Returned when the number of labels differs from the number of classes.
    #[error("expected {expected} labels, got {got}")]
    LabelCountMismatch {
        /// Number of classes.
        expected: usize,
        /// Number of labels supplied.
        got: usize,
    },

    /// Returned when classifying NaN.
    #[error("cannot classify NaN")]
    NonFiniteValue,
}
