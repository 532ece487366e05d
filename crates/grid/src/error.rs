//! Error types for the rainmap-grid crate.

/// Error type for all fallible operations in the rainmap-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when a bound is NaN or infinite.
    #[error("non-finite bound on {axis} axis: [{min}, {max}]")]
    NonFiniteBounds {
        /// Axis name, `"x"` or `"y"`.
        axis: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// Returned when a lower bound exceeds its upper bound.
    #[error("inverted bounds on {axis} axis: min {min} > max {max}")]
    InvertedBounds {
        /// Axis name, `"x"` or `"y"`.
        axis: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// Returned when the grid resolution is zero.
    #[error("resolution must be at least 1, got {resolution}")]
    InvalidResolution {
        /// The invalid resolution.
        resolution: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite_bounds() {
        let e = GridError::NonFiniteBounds {
            axis: "x",
            min: f64::NAN,
            max: 1.0,
        };
        assert_eq!(e.to_string(), "non-finite bound on x axis: [NaN, 1]");
    }

    #[test]
    fn error_inverted_bounds() {
        let e = GridError::InvertedBounds {
            axis: "y",
            min: 5.0,
            max: 2.0,
        };
        assert_eq!(e.to_string(), "inverted bounds on y axis: min 5 > max 2");
    }

    #[test]
    fn error_invalid_resolution() {
        let e = GridError::InvalidResolution { resolution: 0 };
        assert_eq!(e.to_string(), "resolution must be at least 1, got 0");
    }
}
