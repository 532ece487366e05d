//! # rainmap-io
//!
//! File boundaries of the rainmap workflow: read gauge sites and daily
//! measurements from CSV and accumulate them into a
//! [`SampleSet`](rainmap_pipeline::SampleSet), render a classified
//! [`InterpolationResult`](rainmap_pipeline::InterpolationResult) as a PNG
//! map, and export per-point estimates as CSV.

mod error;
mod export;
mod ingest;
mod render;
mod validate;

pub use error::IoError;
pub use export::write_records_csv;
pub use ingest::{IngestConfig, Measurement, Site, accumulate, read_measurements, read_sites};
pub use render::{PALETTE, RenderConfig, render_image, render_png};
