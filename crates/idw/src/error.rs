//! Error types for the rainmap-idw crate.

/// Error type for all fallible operations in the rainmap-idw crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdwError {
    /// Returned when no neighbors are supplied.
    #[error("no neighbors provided")]
    Empty,

    /// Returned when values and distances differ in length.
    #[error("values length {values} does not match distances length {distances}")]
    LengthMismatch {
        /// Length of the values slice.
        values: usize,
        /// Length of the distances slice.
        distances: usize,
    },

    /// Returned when a neighbor distance is negative.
    #[error("negative distance {distance} at neighbor {index}")]
    NegativeDistance {
        /// Position of the offending neighbor.
        index: usize,
        /// The negative distance.
        distance: f64,
    },

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when the power is negative or non-finite.
    #[error("power must be finite and non-negative, got {power}")]
    InvalidPower {
        /// The invalid power.
        power: f64,
    },

    /// Returned when the regularization constant is not a positive finite number.
    #[error("regularization must be finite and positive, got {regularize_by}")]
    InvalidRegularization {
        /// The invalid regularization constant.
        regularize_by: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty() {
        assert_eq!(IdwError::Empty.to_string(), "no neighbors provided");
    }

    #[test]
    fn error_length_mismatch() {
        let e = IdwError::LengthMismatch {
            values: 4,
            distances: 3,
        };
        assert_eq!(
            e.to_string(),
            "values length 4 does not match distances length 3"
        );
    }

    #[test]
    fn error_negative_distance() {
        let e = IdwError::NegativeDistance {
            index: 2,
            distance: -0.5,
        };
        assert_eq!(e.to_string(), "negative distance -0.5 at neighbor 2");
    }

    #[test]
    fn error_non_finite_input() {
        let e = IdwError::NonFiniteInput { input: "values" };
        assert_eq!(e.to_string(), "non-finite value in values");
    }

    #[test]
    fn error_invalid_power() {
        let e = IdwError::InvalidPower { power: -1.0 };
        assert_eq!(e.to_string(), "power must be finite and non-negative, got -1");
    }

    #[test]
    fn error_invalid_regularization() {
        let e = IdwError::InvalidRegularization { regularize_by: 0.0 };
        assert_eq!(
            e.to_string(),
            "regularization must be finite and positive, got 0"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IdwError>();
    }
}
