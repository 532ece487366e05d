//! Configuration for the interpolation pipeline.

use rainmap_idw::IdwConfig;
use rainmap_index::IndexConfig;

use crate::error::PipelineError;

/// Settings for [`run_pipeline`](crate::run_pipeline).
///
/// # Example
///
/// ```
/// use rainmap_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::new().with_k(6).with_parallel(false);
/// assert_eq!(config.k(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Neighbors per grid point.
    k: usize,
    index: IndexConfig,
    idw: IdwConfig,
    /// Evaluate grid chunks on the rayon pool.
    parallel: bool,
    /// Grid points per parallel work item.
    chunk_size: usize,
}

impl PipelineConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults: `k = 4`, default index and estimator settings,
    /// `parallel = true`, `chunk_size = 1024`.
    pub fn new() -> Self {
        Self {
            k: 4,
            index: IndexConfig::new(),
            idw: IdwConfig::new(),
            parallel: true,
            chunk_size: 1024,
        }
    }

    /// Sets the number of neighbors. Checked against the sample count when
    /// the pipeline runs, not here.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    pub fn with_idw(mut self, idw: IdwConfig) -> Self {
        self.idw = idw;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn index(&self) -> &IndexConfig {
        &self.index
    }

    pub fn idw(&self) -> &IdwConfig {
        &self.idw
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the nested index and estimator settings and the chunk size.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.index.validate()?;
        self.idw.validate()?;
        if self.chunk_size == 0 {
            return Err(PipelineError::InvalidChunkSize {
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
