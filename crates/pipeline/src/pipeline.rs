//! Samples → index → grid → estimates → classes.

use rainmap_classify::Classifier;
use rainmap_grid::{Bounds, build_grid};
use rainmap_idw::{IdwConfig, estimate};
use rainmap_index::{IndexError, QueryScratch, SpatialIndex};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::result::{EstimateRecord, InterpolationResult};
use crate::sample::SampleSet;

/// Interpolates `samples` over a `resolution × resolution` grid spanning
/// `bounds` and classifies every estimate.
///
/// The index and grid are built once per call. With
/// [`PipelineConfig::parallel`] the grid is split into chunks evaluated on
/// the rayon pool; the output is identical to the sequential run.
///
/// # Errors
///
/// - [`PipelineError::InsufficientSamples`] if `samples` is empty.
/// - [`PipelineError::NonFiniteSample`] for a NaN or infinite value.
/// - [`PipelineError::Index`] for invalid coordinates, index settings or
///   `k` (`k == 0` or `k > samples.len()`).
/// - [`PipelineError::Grid`] if `resolution == 0`.
/// - Estimator and classifier errors, wrapped.
#[tracing::instrument(skip_all, fields(n_samples = samples.len(), resolution, k = config.k()))]
pub fn run_pipeline(
    samples: &SampleSet,
    bounds: &Bounds,
    resolution: usize,
    classifier: &Classifier,
    config: &PipelineConfig,
) -> Result<InterpolationResult, PipelineError> {
    if samples.is_empty() {
        return Err(PipelineError::InsufficientSamples { n: 0 });
    }
    config.validate()?;

    let values = samples.values();
    check_values(&values)?;

    let index = SpatialIndex::build(&samples.coords(), config.index())?;
    index.validate_k(config.k())?;
    let grid = build_grid(bounds, resolution)?;

    let estimates = evaluate(
        &index,
        &values,
        grid.points(),
        config.k(),
        config.idw(),
        config.parallel(),
        config.chunk_size(),
    )?;
    let classes = classifier.classify_all(&estimates.values)?;

    let records: Vec<EstimateRecord> = grid
        .points()
        .iter()
        .zip(&estimates.values)
        .zip(&classes)
        .map(|((&coord, &value), &class)| EstimateRecord {
            coord,
            value,
            class,
        })
        .collect();

    info!(
        n_points = records.len(),
        n_degenerate = estimates.n_degenerate,
        "interpolation complete"
    );

    Ok(InterpolationResult::new(
        records,
        resolution,
        samples.window(),
        estimates.n_degenerate,
    ))
}

/// Estimates `queries` from the samples in `index`, whose values are
/// `values` (same order as the indexed coordinates).
///
/// Sequential; holds no state between calls.
///
/// # Errors
///
/// - [`PipelineError::LengthMismatch`] unless `values.len() == index.len()`.
/// - [`PipelineError::NonFiniteSample`] for a NaN or infinite value.
/// - [`PipelineError::Index`] for invalid `k` or a non-finite query.
/// - [`PipelineError::Idw`] for invalid estimator settings.
pub fn interpolate_points(
    index: &SpatialIndex,
    values: &[f64],
    queries: &[[f64; 2]],
    k: usize,
    idw: &IdwConfig,
) -> Result<Vec<f64>, PipelineError> {
    if values.len() != index.len() {
        return Err(PipelineError::LengthMismatch {
            values: values.len(),
            samples: index.len(),
        });
    }
    check_values(values)?;
    index.validate_k(k)?;
    idw.validate()?;

    let chunk = estimate_chunk(index, values, queries, 0, k, idw)?;
    Ok(chunk.values)
}

/// Estimates for a contiguous run of queries.
struct Estimates {
    values: Vec<f64>,
    n_degenerate: usize,
}

fn check_values(values: &[f64]) -> Result<(), PipelineError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PipelineError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
fn evaluate(
    index: &SpatialIndex,
    values: &[f64],
    queries: &[[f64; 2]],
    k: usize,
    idw: &IdwConfig,
    parallel: bool,
    chunk_size: usize,
) -> Result<Estimates, PipelineError> {
    let chunks: Vec<Estimates> = if parallel {
        queries
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| estimate_chunk(index, values, chunk, i * chunk_size, k, idw))
            .collect::<Result<_, _>>()?
    } else {
        queries
            .chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| estimate_chunk(index, values, chunk, i * chunk_size, k, idw))
            .collect::<Result<_, _>>()?
    };

    let mut out = Estimates {
        values: Vec::with_capacity(queries.len()),
        n_degenerate: 0,
    };
    for chunk in chunks {
        out.values.extend(chunk.values);
        out.n_degenerate += chunk.n_degenerate;
    }
    Ok(out)
}

/// `offset` is the position of `queries[0]` in the full query list.
fn estimate_chunk(
    index: &SpatialIndex,
    values: &[f64],
    queries: &[[f64; 2]],
    offset: usize,
    k: usize,
    idw: &IdwConfig,
) -> Result<Estimates, PipelineError> {
    let mut scratch = QueryScratch::new(k);
    let mut neighbor_values = Vec::with_capacity(k);
    let mut out = Estimates {
        values: Vec::with_capacity(queries.len()),
        n_degenerate: 0,
    };

    for (i, &query) in queries.iter().enumerate() {
        index
            .query_point_with_scratch(query, k, &mut scratch)
            .map_err(|e| match e {
                IndexError::NonFiniteQuery { .. } => IndexError::NonFiniteQuery { index: offset + i },
                other => other,
            })?;

        if scratch.distances().first() == Some(&0.0) {
            out.n_degenerate += 1;
            debug!(query = offset + i, x = query[0], y = query[1], "query coincides with a sample");
        }

        neighbor_values.clear();
        neighbor_values.extend(scratch.indices().iter().map(|&j| values[j]));
        out.values
            .push(estimate(&neighbor_values, scratch.distances(), idw)?);
    }
    Ok(out)
}
