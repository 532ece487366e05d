//! Gauge samples to a classified precipitation surface.
//!
//! [`run_pipeline`] chains the workspace components: it indexes the sample
//! locations, lays a regular grid over the region, estimates every grid
//! point from its k nearest samples by inverse distance weighting, and
//! classifies the estimates.
//!
//! # Quick start
//!
//! ```
//! use rainmap_classify::Classifier;
//! use rainmap_grid::Bounds;
//! use rainmap_pipeline::{PipelineConfig, SamplePoint, SampleSet, run_pipeline};
//!
//! let samples = SampleSet::new(vec![
//!     SamplePoint::new([0.0, 0.0], 0.5),
//!     SamplePoint::new([10.0, 10.0], 2.6),
//! ]);
//! let bounds = Bounds::new(0.0, 10.0, 0.0, 10.0).unwrap();
//! let config = PipelineConfig::new().with_k(2);
//!
//! let result = run_pipeline(
//!     &samples,
//!     &bounds,
//!     5,
//!     &Classifier::precipitation_inches(),
//!     &config,
//! )
//! .unwrap();
//! assert_eq!(result.records().len(), 25);
//! assert_eq!(result.class_raster_north_up()[[0, 4]], 7);
//! ```
//!
//! # Architecture
//!
//! ```text
//! run_pipeline()
//!   ├─ SpatialIndex::build()            (rainmap-index)
//!   ├─ build_grid()                     (rainmap-grid)
//!   ├─ evaluate()                       chunks, optionally on rayon
//!   │    └─ estimate_chunk()
//!   │         ├─ query_point_with_scratch()
//!   │         └─ estimate()             (rainmap-idw)
//!   └─ Classifier::classify_all()       (rainmap-classify)
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod result;
pub mod sample;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{interpolate_points, run_pipeline};
pub use result::{EstimateRecord, InterpolationResult};
pub use sample::{SamplePoint, SampleSet, ValidityWindow};
