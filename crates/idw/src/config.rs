//! Configuration for inverse-distance weighting.

use crate::error::IdwError;

/// Parameters of the inverse-distance estimator.
///
/// # Example
///
/// ```
/// use rainmap_idw::IdwConfig;
///
/// let config = IdwConfig::new().with_power(2.0).with_regularize_by(1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdwConfig {
    /// Exponent applied to the regularized distance.
    power: f64,
    /// Constant added to every distance before weighting.
    regularize_by: f64,
}

impl IdwConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults: `power = 1.0`, `regularize_by = 1e-9`.
    pub fn new() -> Self {
        Self {
            power: 1.0,
            regularize_by: 1e-9,
        }
    }

    /// Sets the distance exponent. Higher powers make the estimate more local;
    /// `0.0` reduces it to the unweighted mean of the neighbors.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Sets the regularization constant added to each distance.
    pub fn with_regularize_by(mut self, regularize_by: f64) -> Self {
        self.regularize_by = regularize_by;
        self
    }

    /// Returns the distance exponent.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Returns the regularization constant.
    pub fn regularize_by(&self) -> f64 {
        self.regularize_by
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the power is negative or non-finite, or if the
    /// regularization constant is not a positive finite number.
    pub fn validate(&self) -> Result<(), IdwError> {
        if !self.power.is_finite() || self.power < 0.0 {
            return Err(IdwError::InvalidPower { power: self.power });
        }
        if !self.regularize_by.is_finite() || self.regularize_by <= 0.0 {
            return Err(IdwError::InvalidRegularization {
                regularize_by: self.regularize_by,
            });
        }
        Ok(())
    }
}

impl Default for IdwConfig {
    fn default() -> Self {
        Self::new()
    }
}
