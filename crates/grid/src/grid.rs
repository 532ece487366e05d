//! Evenly spaced evaluation grids.

use crate::bounds::Bounds;
use crate::error::GridError;

/// Returns `n` evenly spaced values from `start` to `stop`, both inclusive.
///
/// `n == 1` yields `[start]` and `n == 0` an empty vector. The last element
/// is exactly `stop` regardless of rounding in the step.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// A `resolution × resolution` lattice of evaluation points.
///
/// Points are stored row-major: rows follow y (south to north), columns
/// follow x (west to east), and point `r * n + c` is `(xs[c], ys[r])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    resolution: usize,
    xs: Vec<f64>,
    ys: Vec<f64>,
    points: Vec<[f64; 2]>,
}

impl Grid {
    /// All points in row-major order.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Column coordinates, ascending.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Row coordinates, ascending.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total number of points, `resolution²`.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a grid has at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at row `r`, column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `r` or `c` is not below `resolution()`.
    pub fn point(&self, r: usize, c: usize) -> [f64; 2] {
        assert!(r < self.resolution && c < self.resolution);
        self.points[r * self.resolution + c]
    }

    /// Consumes the grid, returning its points.
    pub fn into_points(self) -> Vec<[f64; 2]> {
        self.points
    }
}

/// Builds the `resolution × resolution` grid spanning `bounds`.
///
/// # Errors
///
/// [`GridError::InvalidResolution`] if `resolution == 0`.
///
/// # Example
///
/// ```
/// use rainmap_grid::{Bounds, build_grid};
///
/// let grid = build_grid(&Bounds::new(0.0, 10.0, 0.0, 20.0).unwrap(), 3).unwrap();
/// assert_eq!(grid.xs(), &[0.0, 5.0, 10.0]);
/// assert_eq!(grid.point(1, 2), [10.0, 10.0]);
/// ```
pub fn build_grid(bounds: &Bounds, resolution: usize) -> Result<Grid, GridError> {
    if resolution == 0 {
        return Err(GridError::InvalidResolution { resolution });
    }

    let xs = linspace(bounds.x_min(), bounds.x_max(), resolution);
    let ys = linspace(bounds.y_min(), bounds.y_max(), resolution);
    let points = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| [x, y]))
        .collect();

    Ok(Grid {
        resolution,
        xs,
        ys,
        points,
    })
}
