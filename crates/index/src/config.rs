//! Configuration for spatial index construction and queries.

use crate::error::IndexError;

/// Distance metric used to rank neighbors.
///
/// All variants are members of the Minkowski family of order `p`:
///
/// | Variant | Order | Formula |
/// |---------|-------|---------|
/// | Manhattan | 1 | `|dx| + |dy|` |
/// | Euclidean | 2 | `sqrt(dx² + dy²)` |
/// | Chebyshev | ∞ | `max(|dx|, |dy|)` |
/// | Minkowski | p | `(|dx|^p + |dy|^p)^(1/p)` |
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DistanceMetric {
    /// Minkowski order 1. Default, matching the reference precipitation maps.
    #[default]
    Manhattan,
    /// Minkowski order 2.
    Euclidean,
    /// Minkowski order ∞.
    Chebyshev,
    /// General Minkowski order `p >= 1`.
    Minkowski {
        /// Order of the norm.
        p: f64,
    },
}

impl DistanceMetric {
    /// Maps a Minkowski order onto the matching variant.
    ///
    /// Orders 1, 2 and ∞ resolve to the specialised variants. Any other value
    /// is kept as [`DistanceMetric::Minkowski`] and checked by
    /// [`IndexConfig::validate`].
    pub fn from_order(p: f64) -> Self {
        if p == 1.0 {
            Self::Manhattan
        } else if p == 2.0 {
            Self::Euclidean
        } else if p == f64::INFINITY {
            Self::Chebyshev
        } else {
            Self::Minkowski { p }
        }
    }

    /// Returns the Minkowski order of this metric.
    pub fn order(&self) -> f64 {
        match self {
            Self::Manhattan => 1.0,
            Self::Euclidean => 2.0,
            Self::Chebyshev => f64::INFINITY,
            Self::Minkowski { p } => *p,
        }
    }
}

/// Search structure used to answer queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Bucketed k-d tree with O(log N) average-case queries.
    #[default]
    KdTree,
    /// Exhaustive scan over every sample. Same answers, O(N) per query.
    Linear,
}

/// Configuration for a [`SpatialIndex`](crate::SpatialIndex).
///
/// # Example
///
/// ```
/// use rainmap_index::{DistanceMetric, IndexConfig, SearchStrategy};
///
/// let config = IndexConfig::new()
///     .with_metric(DistanceMetric::Euclidean)
///     .with_leaf_size(8)
///     .with_strategy(SearchStrategy::KdTree);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexConfig {
    /// Metric used to rank neighbors.
    metric: DistanceMetric,
    /// Approximation slack; 0 means exact.
    eps: f64,
    /// Maximum number of samples stored in a k-d tree leaf.
    leaf_size: usize,
    /// Search structure.
    strategy: SearchStrategy,
}

impl IndexConfig {
    /// Creates a configuration with default settings.
    ///
    /// Defaults: `metric = Manhattan`, `eps = 0.0`, `leaf_size = 20`,
    /// `strategy = KdTree`.
    pub fn new() -> Self {
        Self {
            metric: DistanceMetric::Manhattan,
            eps: 0.0,
            leaf_size: 20,
            strategy: SearchStrategy::KdTree,
        }
    }

    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the approximation slack.
    ///
    /// With `eps > 0` the k-th reported neighbor is guaranteed to be no
    /// further than `(1 + eps)` times the true k-th nearest distance.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the k-d tree leaf size.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Returns the approximation slack.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Returns the k-d tree leaf size.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Returns the search strategy.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the metric order is NaN or below 1, if eps is
    /// negative or non-finite, or if the leaf size is zero.
    pub fn validate(&self) -> Result<(), IndexError> {
        let p = self.metric.order();
        if p.is_nan() || p < 1.0 {
            return Err(IndexError::InvalidMetric { p });
        }
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(IndexError::InvalidEps { eps: self.eps });
        }
        if self.leaf_size < 1 {
            return Err(IndexError::InvalidLeafSize {
                leaf_size: self.leaf_size,
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
