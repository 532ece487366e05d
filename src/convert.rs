//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use rainmap_classify::Classifier;
use rainmap_grid::Bounds;
use rainmap_idw::IdwConfig;
use rainmap_index::{DistanceMetric, IndexConfig, SearchStrategy};
use rainmap_io::{IngestConfig, RenderConfig};
use rainmap_pipeline::PipelineConfig;

/// Parses a search strategy name into the corresponding enum variant.
pub fn parse_strategy(s: &str) -> Result<SearchStrategy> {
    match s.to_lowercase().as_str() {
        "kdtree" | "kd-tree" => Ok(SearchStrategy::KdTree),
        "linear" => Ok(SearchStrategy::Linear),
        other => bail!("unknown search strategy: {other:?} (expected \"kdtree\" or \"linear\")"),
    }
}

/// Builds the interpolation region from the TOML region section.
pub fn build_bounds(region: &RegionToml) -> Result<Bounds> {
    Bounds::new(region.x_min, region.x_max, region.y_min, region.y_max)
        .context("invalid [region] bounds")
}

/// Builds a [`PipelineConfig`] from the TOML idw section.
pub fn build_pipeline_config(idw: &IdwToml) -> Result<PipelineConfig> {
    let index = IndexConfig::new()
        .with_metric(DistanceMetric::from_order(idw.metric_p))
        .with_eps(idw.eps)
        .with_leaf_size(idw.leaf_size)
        .with_strategy(parse_strategy(&idw.strategy)?);
    let weighting = IdwConfig::new()
        .with_power(idw.power)
        .with_regularize_by(idw.regularize_by);
    let cfg = PipelineConfig::new()
        .with_k(idw.k)
        .with_index(index)
        .with_idw(weighting)
        .with_parallel(idw.parallel)
        .with_chunk_size(idw.chunk_size);
    cfg.validate().context("invalid [idw] settings")?;
    Ok(cfg)
}

/// Builds a [`Classifier`] from the TOML classes section.
///
/// Without `thresholds` the seven-class inch scheme is used; `labels`, when
/// given, replace the labels of whichever scheme results.
pub fn build_classifier(classes: &ClassesToml) -> Result<Classifier> {
    let classifier = match &classes.thresholds {
        Some(t) => Classifier::new(t.clone()).context("invalid [classes] thresholds")?,
        None => Classifier::precipitation_inches(),
    };
    match &classes.labels {
        Some(labels) => classifier
            .with_labels(labels.clone())
            .context("invalid [classes] labels"),
        None => Ok(classifier),
    }
}

/// Builds an [`IngestConfig`] from the TOML ingest section.
pub fn build_ingest_config(ingest: &IngestToml) -> Result<IngestConfig> {
    let cfg = IngestConfig::default()
        .with_site_columns(
            &ingest.site_column,
            &ingest.easting_column,
            &ingest.northing_column,
        )
        .with_measurement_columns(
            &ingest.measurement_site_column,
            &ingest.date_column,
            &ingest.value_column,
        )
        .with_date_format(&ingest.date_format)
        .with_window_days(ingest.window_days)
        .with_unit_divisor(ingest.unit_divisor);
    cfg.validate().context("invalid [ingest] settings")?;
    Ok(cfg)
}

/// Builds a [`RenderConfig`] from the TOML render section.
pub fn build_render_config(render: &RenderToml) -> RenderConfig {
    RenderConfig::default()
        .with_cell_size(render.cell_size)
        .with_marker_radius(render.marker_radius)
}
