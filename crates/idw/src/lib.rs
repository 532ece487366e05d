//! Inverse-distance-weighted (IDW) estimation.
//!
//! Given the values of a query point's k nearest samples and their distances,
//! computes the weighted mean
//!
//! ```text
//! ẑ = Σ zᵢ / (dᵢ + ε)^p  /  Σ 1 / (dᵢ + ε)^p
//! ```
//!
//! The estimator is a pure function: neighbor lookup is the caller's job
//! (see `rainmap-index`), and nothing is retained between calls.
//!
//! # Quick start
//!
//! ```
//! use rainmap_idw::{IdwConfig, estimate};
//!
//! let z = estimate(&[1.0, 3.0], &[5.0, 5.0], &IdwConfig::default()).unwrap();
//! assert_eq!(z, 2.0);
//! ```

pub mod config;
pub mod error;
pub mod estimate;

pub use config::IdwConfig;
pub use error::IdwError;
pub use estimate::{estimate, weights};
