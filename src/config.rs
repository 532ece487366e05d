use std::path::PathBuf;

use serde::Deserialize;

/// Top-level rainmap configuration, read from TOML.
///
/// Every section is optional; omitted fields take the defaults of the
/// reference pasture network.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RainmapConfig {
    /// Input and output paths.
    #[serde(default)]
    pub io: IoToml,

    /// Interpolation region and grid resolution.
    #[serde(default)]
    pub region: RegionToml,

    /// Neighbor search and weighting.
    #[serde(default)]
    pub idw: IdwToml,

    /// Classification scheme.
    #[serde(default)]
    pub classes: ClassesToml,

    /// CSV columns and accumulation window.
    #[serde(default)]
    pub ingest: IngestToml,

    /// PNG geometry.
    #[serde(default)]
    pub render: RenderToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub sites: Option<PathBuf>,
    pub measurements: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub records_csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionToml {
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

impl Default for RegionToml {
    fn default() -> Self {
        Self {
            x_min: default_x_min(),
            x_max: default_x_max(),
            y_min: default_y_min(),
            y_max: default_y_max(),
            resolution: default_resolution(),
        }
    }
}

fn default_x_min() -> f64 {
    517_624.843_75
}
fn default_x_max() -> f64 {
    527_273.75
}
fn default_y_min() -> f64 {
    4_514_740.5
}
fn default_y_max() -> f64 {
    4_524_361.0
}
fn default_resolution() -> usize {
    400
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdwToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_power")]
    pub power: f64,
    /// Minkowski order; `inf` selects Chebyshev.
    #[serde(default = "default_metric_p")]
    pub metric_p: f64,
    #[serde(default)]
    pub eps: f64,
    #[serde(default = "default_regularize_by")]
    pub regularize_by: f64,
    #[serde(default = "default_leaf_size")]
    pub leaf_size: usize,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for IdwToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            power: default_power(),
            metric_p: default_metric_p(),
            eps: 0.0,
            regularize_by: default_regularize_by(),
            leaf_size: default_leaf_size(),
            strategy: default_strategy(),
            parallel: true,
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_k() -> usize {
    4
}
fn default_power() -> f64 {
    1.0
}
fn default_metric_p() -> f64 {
    1.0
}
fn default_regularize_by() -> f64 {
    1e-9
}
fn default_leaf_size() -> usize {
    20
}
fn default_strategy() -> String {
    "kdtree".to_string()
}
fn default_true() -> bool {
    true
}
fn default_chunk_size() -> usize {
    1024
}

/// Omitting `thresholds` selects the seven-class inch scheme with its labels.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClassesToml {
    pub thresholds: Option<Vec<f64>>,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestToml {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_unit_divisor")]
    pub unit_divisor: f64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_site_column")]
    pub site_column: String,
    #[serde(default = "default_easting_column")]
    pub easting_column: String,
    #[serde(default = "default_northing_column")]
    pub northing_column: String,
    #[serde(default = "default_measurement_site_column")]
    pub measurement_site_column: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
}

impl Default for IngestToml {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            unit_divisor: default_unit_divisor(),
            date_format: default_date_format(),
            site_column: default_site_column(),
            easting_column: default_easting_column(),
            northing_column: default_northing_column(),
            measurement_site_column: default_measurement_site_column(),
            date_column: default_date_column(),
            value_column: default_value_column(),
        }
    }
}

fn default_window_days() -> u32 {
    7
}
fn default_unit_divisor() -> f64 {
    25.4
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_site_column() -> String {
    "pasture".to_string()
}
fn default_easting_column() -> String {
    "Easting_UTM".to_string()
}
fn default_northing_column() -> String {
    "Northing_UTM".to_string()
}
fn default_measurement_site_column() -> String {
    "site".to_string()
}
fn default_date_column() -> String {
    "date".to_string()
}
fn default_value_column() -> String {
    "raw.value".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderToml {
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    #[serde(default = "default_marker_radius")]
    pub marker_radius: u32,
}

impl Default for RenderToml {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            marker_radius: default_marker_radius(),
        }
    }
}

fn default_cell_size() -> u32 {
    2
}
fn default_marker_radius() -> u32 {
    4
}
