//! Inverse-distance-weighted aggregation of neighbor values.

use crate::config::IdwConfig;
use crate::error::IdwError;

/// Estimates a value from its neighbors by inverse distance weighting.
///
/// ```text
/// dᵢ' = dᵢ + ε
/// wᵢ  = 1 / dᵢ'^p
/// ẑ   = Σ wᵢ zᵢ / Σ wᵢ
/// ```
///
/// `ε` (`regularize_by`) keeps a query that coincides with a sample finite:
/// the coincident sample dominates but never produces a division by zero.
/// When every distance is zero all weights are equal and the result is the
/// plain mean of the neighbor values.
///
/// # Errors
///
/// Returns [`IdwError`] for invalid configuration, empty or mismatched
/// inputs, negative distances, or non-finite values/distances.
pub fn estimate(values: &[f64], distances: &[f64], config: &IdwConfig) -> Result<f64, IdwError> {
    config.validate()?;
    validate_inputs(values, distances)?;

    let (sum_w, sum_wz) = scaled_weights(distances, config)
        .zip(values)
        .fold((0.0, 0.0), |(sw, swz), (w, &z)| (sw + w, swz + w * z));
    Ok(sum_wz / sum_w)
}

/// Returns the normalized weights (non-negative, summing to 1) that
/// [`estimate`] applies to each neighbor.
///
/// # Errors
///
/// Same as [`estimate`], except that values are not inspected.
pub fn weights(distances: &[f64], config: &IdwConfig) -> Result<Vec<f64>, IdwError> {
    config.validate()?;
    validate_distances(distances)?;

    let raw: Vec<f64> = scaled_weights(distances, config).collect();
    let total: f64 = raw.iter().sum();
    Ok(raw.into_iter().map(|w| w / total).collect())
}

/// Weights divided by the weight of the nearest neighbor.
///
/// `(d_min' / dᵢ')^p` is proportional to `1 / dᵢ'^p` and lies in `(0, 1]`, so
/// large powers cannot overflow to `inf / inf`.
fn scaled_weights<'a>(
    distances: &'a [f64],
    config: &IdwConfig,
) -> impl Iterator<Item = f64> + 'a {
    let eps = config.regularize_by();
    let power = config.power();
    let d_min = distances.iter().copied().fold(f64::INFINITY, f64::min) + eps;
    distances.iter().map(move |&d| {
        let ratio = d_min / (d + eps);
        if power == 1.0 { ratio } else { ratio.powf(power) }
    })
}

fn validate_inputs(values: &[f64], distances: &[f64]) -> Result<(), IdwError> {
    if values.len() != distances.len() {
        return Err(IdwError::LengthMismatch {
            values: values.len(),
            distances: distances.len(),
        });
    }
    validate_distances(distances)?;
    if values.iter().any(|v| !v.is_finite()) {
        return Err(IdwError::NonFiniteInput { input: "values" });
    }
    Ok(())
}

fn validate_distances(distances: &[f64]) -> Result<(), IdwError> {
    if distances.is_empty() {
        return Err(IdwError::Empty);
    }
    if distances.iter().any(|d| !d.is_finite()) {
        return Err(IdwError::NonFiniteInput { input: "distances" });
    }
    if let Some(index) = distances.iter().position(|&d| d < 0.0) {
        return Err(IdwError::NegativeDistance {
            index,
            distance: distances[index],
        });
    }
    Ok(())
}
