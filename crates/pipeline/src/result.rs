//! Output types for the interpolation pipeline.

use ndarray::Array2;

use crate::sample::ValidityWindow;

/// Estimate and class at one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateRecord {
    pub coord: [f64; 2],
    pub value: f64,
    /// 1-based class from the classifier.
    pub class: u8,
}

/// Result of a pipeline run: one record per grid point in grid order
/// (row-major, row 0 at the southern edge).
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationResult {
    records: Vec<EstimateRecord>,
    resolution: usize,
    window: Option<ValidityWindow>,
    n_degenerate: usize,
}

impl InterpolationResult {
    pub(crate) fn new(
        records: Vec<EstimateRecord>,
        resolution: usize,
        window: Option<ValidityWindow>,
        n_degenerate: usize,
    ) -> Self {
        debug_assert_eq!(records.len(), resolution * resolution);
        Self {
            records,
            resolution,
            window,
            n_degenerate,
        }
    }

    pub fn records(&self) -> &[EstimateRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EstimateRecord> {
        self.records
    }

    /// Grid points per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Accumulation period carried over from the input samples.
    pub fn window(&self) -> Option<ValidityWindow> {
        self.window
    }

    /// Number of grid points that coincided exactly with a sample.
    pub fn n_degenerate(&self) -> usize {
        self.n_degenerate
    }

    /// Estimated values in grid order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    /// Classes in grid order.
    pub fn classes(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.class).collect()
    }

    /// Classes as a `resolution × resolution` image with row 0 at the
    /// northern edge.
    pub fn class_raster_north_up(&self) -> Array2<u8> {
        self.north_up(|r| r.class)
    }

    /// Estimates as a `resolution × resolution` image with row 0 at the
    /// northern edge.
    pub fn value_raster_north_up(&self) -> Array2<f64> {
        self.north_up(|r| r.value)
    }

    /// Reshapes row-major records and flips the vertical axis.
    fn north_up<T>(&self, field: impl Fn(&EstimateRecord) -> T) -> Array2<T> {
        let n = self.resolution;
        Array2::from_shape_fn((n, n), |(row, col)| field(&self.records[(n - 1 - row) * n + col]))
    }
}
