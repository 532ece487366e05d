//! Error types for the rainmap-pipeline crate.

use chrono::NaiveDate;
use rainmap_classify::ClassifyError;
use rainmap_grid::GridError;
use rainmap_idw::IdwError;
use rainmap_index::IndexError;

/// Error type for all fallible operations in the rainmap-pipeline crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// Returned when there are no samples to interpolate from.
    #[error("insufficient samples: got {n}, need at least 1")]
    InsufficientSamples {
        /// Number of samples supplied.
        n: usize,
    },

    /// Returned when a sample value is NaN or infinite.
    #[error("non-finite value for sample {index}")]
    NonFiniteSample {
        /// Position of the offending sample.
        index: usize,
    },

    /// Returned when the value slice does not match the indexed samples.
    #[error("got {values} values for {samples} indexed samples")]
    LengthMismatch {
        /// Number of values supplied.
        values: usize,
        /// Number of samples in the index.
        samples: usize,
    },

    /// Returned when a validity window ends before it starts.
    #[error("window start {start} is after end {end}")]
    InvalidWindow {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },

    /// Returned when the parallel chunk size is zero.
    #[error("chunk size must be at least 1, got {chunk_size}")]
    InvalidChunkSize {
        /// The invalid chunk size.
        chunk_size: usize,
    },

    /// Spatial index error.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Estimator error.
    #[error(transparent)]
    Idw(#[from] IdwError),

    /// Grid construction error.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Classification error.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
