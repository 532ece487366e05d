//! Error types for the rainmap-index crate.

/// Error type for all fallible operations in the rainmap-index crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// Returned when the index is built from an empty sample set.
    #[error("invalid input: no sample points provided")]
    InvalidInput,

    /// Returned when a sample coordinate is NaN or infinite.
    #[error("non-finite coordinate at sample {index}")]
    NonFiniteCoordinate {
        /// Position of the offending sample.
        index: usize,
    },

    /// Returned when a query point is NaN or infinite.
    #[error("non-finite query point at position {index}")]
    NonFiniteQuery {
        /// Position of the offending query point.
        index: usize,
    },

    /// Returned when k is zero or exceeds the number of samples.
    #[error("k must be in 1..={n_samples}, got {k}")]
    InvalidK {
        /// The requested neighbor count.
        k: usize,
        /// Number of samples in the index.
        n_samples: usize,
    },

    /// Returned when the Minkowski order is NaN or below 1.
    #[error("minkowski order must be >= 1, got {p}")]
    InvalidMetric {
        /// The invalid order.
        p: f64,
    },

    /// Returned when the approximation slack is negative or non-finite.
    #[error("eps must be finite and non-negative, got {eps}")]
    InvalidEps {
        /// The invalid slack.
        eps: f64,
    },

    /// Returned when the leaf size is zero.
    #[error("leaf size must be >= 1, got {leaf_size}")]
    InvalidLeafSize {
        /// The invalid leaf size.
        leaf_size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_input() {
        let e = IndexError::InvalidInput;
        assert_eq!(e.to_string(), "invalid input: no sample points provided");
    }

    #[test]
    fn error_non_finite_coordinate() {
        let e = IndexError::NonFiniteCoordinate { index: 3 };
        assert_eq!(e.to_string(), "non-finite coordinate at sample 3");
    }

    #[test]
    fn error_non_finite_query() {
        let e = IndexError::NonFiniteQuery { index: 12 };
        assert_eq!(e.to_string(), "non-finite query point at position 12");
    }

    #[test]
    fn error_invalid_k() {
        let e = IndexError::InvalidK { k: 5, n_samples: 2 };
        assert_eq!(e.to_string(), "k must be in 1..=2, got 5");
    }

    #[test]
    fn error_invalid_metric() {
        let e = IndexError::InvalidMetric { p: 0.5 };
        assert_eq!(e.to_string(), "minkowski order must be >= 1, got 0.5");
    }

    #[test]
    fn error_invalid_eps() {
        let e = IndexError::InvalidEps { eps: -0.1 };
        assert_eq!(e.to_string(), "eps must be finite and non-negative, got -0.1");
    }

    #[test]
    fn error_invalid_leaf_size() {
        let e = IndexError::InvalidLeafSize { leaf_size: 0 };
        assert_eq!(e.to_string(), "leaf size must be >= 1, got 0");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<IndexError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<IndexError>();
    }
}
