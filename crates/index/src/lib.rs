//! Static k-nearest-neighbor index over planar sample locations.
//!
//! The index is built once from the full set of gauge coordinates and then
//! answers k-nearest queries for every cell of the interpolation grid.
//!
//! | Strategy | Build | Query |
//! |----------|-------|-------|
//! | `KdTree` | O(N log N) | O(log N) average |
//! | `Linear` | O(N) | O(N) |
//!
//! Both strategies return identical neighbors: ranking is by distance under
//! the configured [`DistanceMetric`] (Manhattan by default), ties broken by
//! ascending sample index.
//!
//! # Quick start
//!
//! ```
//! use rainmap_index::{IndexConfig, SpatialIndex};
//!
//! let gauges = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];
//! let index = SpatialIndex::build(&gauges, &IndexConfig::default()).unwrap();
//!
//! let neighbors = index.query(&[[1.0, 1.0]], 2).unwrap();
//! assert_eq!(neighbors.indices(0)[0], 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! SpatialIndex::query()
//!   ├─ check k, finite query
//!   ├─ KdTree::search()  or  scan_linear()   (kdtree.rs / select.rs)
//!   │    └─ distance()                        (distance.rs)
//!   └─ Candidates → Neighbors                 (select.rs / result.rs)
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod result;

pub(crate) mod distance;
pub(crate) mod kdtree;
pub(crate) mod select;

pub use config::{DistanceMetric, IndexConfig, SearchStrategy};
pub use error::IndexError;
pub use index::{QueryScratch, SpatialIndex};
pub use result::Neighbors;
