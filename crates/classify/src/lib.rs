//! Threshold classification of continuous values into ordinal classes.
//!
//! A [`Classifier`] holds strictly ascending interior boundaries and assigns
//! each value the 1-based index of the left-closed bin containing it, the
//! same convention as `digitize` in array libraries. Classes start at 1 so
//! they can index a palette directly.
//!
//! # Quick start
//!
//! ```
//! use rainmap_classify::Classifier;
//!
//! let c = Classifier::precipitation_inches();
//! assert_eq!(c.classify(1.5).unwrap(), 3);
//! assert_eq!(c.labels()[2], "1.5-2.2");
//! ```

pub mod classifier;
pub mod error;

pub use classifier::Classifier;
pub use error::ClassifyError;
