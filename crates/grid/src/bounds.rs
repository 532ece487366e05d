//! Rectangular region in projected coordinates.

use crate::error::GridError;

/// Axis-aligned rectangle `[x_min, x_max] × [y_min, y_max]`.
///
/// Degenerate (zero-width or zero-height) regions are allowed; the grid
/// then collapses onto a line or a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    /// Creates a region, checking that every bound is finite and each
    /// minimum does not exceed its maximum.
    ///
    /// # Errors
    ///
    /// - [`GridError::NonFiniteBounds`] if any bound is NaN or infinite.
    /// - [`GridError::InvertedBounds`] if `min > max` on either axis.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, GridError> {
        check_axis("x", x_min, x_max)?;
        check_axis("y", y_min, y_max)?;
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns `true` if `point` lies inside the closed rectangle.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        (self.x_min..=self.x_max).contains(&point[0])
            && (self.y_min..=self.y_max).contains(&point[1])
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64) -> Result<(), GridError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(GridError::NonFiniteBounds { axis, min, max });
    }
    if min > max {
        return Err(GridError::InvertedBounds { axis, min, max });
    }
    Ok(())
}
