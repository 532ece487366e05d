//! Minkowski distance computation.

use crate::config::DistanceMetric;

/// Computes the distance between two planar points under `metric`.
///
/// Dispatches to specialised implementations for orders 1, 2 and ∞.
#[inline]
pub(crate) fn distance(metric: DistanceMetric, a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = (a[0] - b[0]).abs();
    let dy = (a[1] - b[1]).abs();
    match metric {
        DistanceMetric::Manhattan => dx + dy,
        DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
        DistanceMetric::Chebyshev => dx.max(dy),
        DistanceMetric::Minkowski { p } => minkowski_p(dx, dy, p),
    }
}

/// Scaled by the larger component so `|d|^p` cannot overflow for large
/// orders on projected coordinates.
#[inline]
fn minkowski_p(dx: f64, dy: f64, p: f64) -> f64 {
    let m = dx.max(dy);
    if p == f64::INFINITY || m == 0.0 {
        return m;
    }
    m * ((dx / m).powf(p) + (dy / m).powf(p)).powf(1.0 / p)
}
