//! Spatial index entry point and scratch buffer management.

use tracing::debug;

use crate::config::{IndexConfig, SearchStrategy};
use crate::error::IndexError;
use crate::kdtree::KdTree;
use crate::result::Neighbors;
use crate::select::{Candidates, scan_linear};

/// Pre-allocated scratch buffers for single-point queries.
///
/// Reuse across calls to [`SpatialIndex::query_point_with_scratch`] to avoid
/// a heap allocation per grid cell. One scratch per worker thread.
///
/// # Example
///
/// ```
/// use rainmap_index::{IndexConfig, QueryScratch, SpatialIndex};
///
/// let index = SpatialIndex::build(&[[0.0, 0.0], [1.0, 0.0]], &IndexConfig::new()).unwrap();
/// let mut scratch = QueryScratch::new(2);
/// index.query_point_with_scratch([0.2, 0.0], 2, &mut scratch).unwrap();
/// assert_eq!(scratch.indices(), &[0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryScratch {
    candidates: Candidates,
    indices: Vec<usize>,
    distances: Vec<f64>,
}

impl QueryScratch {
    /// Creates a scratch buffer sized for `k` neighbors.
    pub fn new(k: usize) -> Self {
        Self {
            candidates: Candidates::with_capacity(k),
            indices: Vec::with_capacity(k),
            distances: Vec::with_capacity(k),
        }
    }

    /// Neighbor indices from the last query, nearest first.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Neighbor distances from the last query, ascending.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }
}

/// Immutable k-nearest-neighbor index over planar sample coordinates.
///
/// Built once per run from the full sample set; there is no insertion or
/// removal. Shared read-only across threads during batch evaluation.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    coords: Vec<[f64; 2]>,
    config: IndexConfig,
    tree: Option<KdTree>,
}

impl SpatialIndex {
    /// Builds an index over `coords`.
    ///
    /// # Errors
    ///
    /// - [`IndexError::InvalidInput`] if `coords` is empty.
    /// - [`IndexError::NonFiniteCoordinate`] if any coordinate is NaN or ∞.
    /// - Config validation errors from [`IndexConfig::validate`].
    pub fn build(coords: &[[f64; 2]], config: &IndexConfig) -> Result<Self, IndexError> {
        config.validate()?;

        if coords.is_empty() {
            return Err(IndexError::InvalidInput);
        }
        if let Some(index) = coords
            .iter()
            .position(|c| !c[0].is_finite() || !c[1].is_finite())
        {
            return Err(IndexError::NonFiniteCoordinate { index });
        }

        let coords = coords.to_vec();
        let tree = match config.strategy() {
            SearchStrategy::KdTree => {
                let tree = KdTree::build(&coords, config.leaf_size());
                debug!(
                    n_samples = coords.len(),
                    n_nodes = tree.n_nodes(),
                    depth = tree.depth(),
                    "built k-d tree"
                );
                Some(tree)
            }
            SearchStrategy::Linear => None,
        };

        Ok(Self {
            coords,
            config: config.clone(),
            tree,
        })
    }

    /// Returns the number of indexed samples (always >= 1).
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always `false`: an index cannot be built from zero samples.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the indexed coordinates in their original order.
    pub fn coords(&self) -> &[[f64; 2]] {
        &self.coords
    }

    /// Returns the configuration the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Finds the `k` nearest samples to every point in `points`.
    ///
    /// # Errors
    ///
    /// - [`IndexError::InvalidK`] if `k == 0` or `k > len()`.
    /// - [`IndexError::NonFiniteQuery`] naming the first non-finite point.
    pub fn query(&self, points: &[[f64; 2]], k: usize) -> Result<Neighbors, IndexError> {
        self.validate_k(k)?;
        let mut out = Neighbors::with_capacity(points.len(), k);
        let mut candidates = Candidates::with_capacity(k);
        for (q, &point) in points.iter().enumerate() {
            check_finite(point, q)?;
            candidates.reset(k);
            self.search(point, &mut candidates);
            out.push_row(candidates.items());
        }
        Ok(out)
    }

    /// Finds the `k` nearest samples to a single point.
    ///
    /// # Errors
    ///
    /// Same as [`SpatialIndex::query`].
    pub fn query_point(&self, point: [f64; 2], k: usize) -> Result<Neighbors, IndexError> {
        self.query(&[point], k)
    }

    /// Finds the `k` nearest samples to `point`, writing into `scratch`.
    ///
    /// Identical to [`SpatialIndex::query_point`] but reuses the buffers in
    /// `scratch`. Results are read back via [`QueryScratch::indices`] and
    /// [`QueryScratch::distances`].
    ///
    /// # Errors
    ///
    /// Same as [`SpatialIndex::query`].
    pub fn query_point_with_scratch(
        &self,
        point: [f64; 2],
        k: usize,
        scratch: &mut QueryScratch,
    ) -> Result<(), IndexError> {
        self.validate_k(k)?;
        check_finite(point, 0)?;

        scratch.candidates.reset(k);
        self.search(point, &mut scratch.candidates);

        scratch.indices.clear();
        scratch.distances.clear();
        for &(d, i) in scratch.candidates.items() {
            scratch.indices.push(i);
            scratch.distances.push(d);
        }
        Ok(())
    }

    /// Checks that `k` neighbors can be requested from this index.
    ///
    /// # Errors
    ///
    /// [`IndexError::InvalidK`] if `k == 0` or `k > len()`.
    pub fn validate_k(&self, k: usize) -> Result<(), IndexError> {
        if k == 0 || k > self.coords.len() {
            return Err(IndexError::InvalidK {
                k,
                n_samples: self.coords.len(),
            });
        }
        Ok(())
    }

    fn search(&self, point: [f64; 2], candidates: &mut Candidates) {
        match &self.tree {
            Some(tree) => tree.search(
                &self.coords,
                self.config.metric(),
                self.config.eps(),
                point,
                candidates,
            ),
            None => scan_linear(&self.coords, self.config.metric(), point, candidates),
        }
    }
}

fn check_finite(point: [f64; 2], index: usize) -> Result<(), IndexError> {
    if point[0].is_finite() && point[1].is_finite() {
        Ok(())
    } else {
        Err(IndexError::NonFiniteQuery { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistanceMetric;
    use approx::assert_abs_diff_eq;

    fn two_gauges() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0]]
    }

    #[test]
    fn test_build_and_len() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert_eq!(index.coords(), two_gauges().as_slice());
    }

    #[test]
    fn test_query_nearest_first() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        let n = index.query(&[[2.0, 1.0], [9.0, 0.0]], 2).unwrap();
        assert_eq!(n.n_queries(), 2);
        assert_eq!(n.indices(0), &[0, 1]);
        // Manhattan: |2| + |1| = 3, |8| + |1| = 9
        assert_abs_diff_eq!(n.distances(0)[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.distances(0)[1], 9.0, epsilon = 1e-12);
        assert_eq!(n.indices(1), &[1, 0]);
    }

    #[test]
    fn test_metric_changes_ranking() {
        // (3, 3) vs (0, 5) from origin: Manhattan 6 vs 5, Chebyshev 3 vs 5.
        let coords = vec![[3.0, 3.0], [0.0, 5.0]];
        let manhattan = SpatialIndex::build(&coords, &IndexConfig::new()).unwrap();
        let chebyshev = SpatialIndex::build(
            &coords,
            &IndexConfig::new().with_metric(DistanceMetric::Chebyshev),
        )
        .unwrap();
        assert_eq!(manhattan.query_point([0.0, 0.0], 1).unwrap().indices(0), &[1]);
        assert_eq!(chebyshev.query_point([0.0, 0.0], 1).unwrap().indices(0), &[0]);
    }

    #[test]
    fn test_scratch_matches_allocating() {
        let coords: Vec<[f64; 2]> = (0..60)
            .map(|i| [(i * 7 % 13) as f64, (i * 5 % 11) as f64])
            .collect();
        let index = SpatialIndex::build(&coords, &IndexConfig::new().with_leaf_size(3)).unwrap();
        let mut scratch = QueryScratch::new(4);
        for q in [[0.0, 0.0], [6.5, 4.5], [12.0, 10.0]] {
            let n = index.query_point(q, 4).unwrap();
            index.query_point_with_scratch(q, 4, &mut scratch).unwrap();
            assert_eq!(scratch.indices(), n.indices(0));
            assert_eq!(scratch.distances(), n.distances(0));
        }
    }

    #[test]
    fn test_error_empty() {
        let result = SpatialIndex::build(&[], &IndexConfig::new());
        assert!(matches!(result, Err(IndexError::InvalidInput)));
    }

    #[test]
    fn test_error_non_finite_coordinate() {
        let coords = [[0.0, 0.0], [f64::NAN, 1.0]];
        let result = SpatialIndex::build(&coords, &IndexConfig::new());
        assert!(matches!(
            result,
            Err(IndexError::NonFiniteCoordinate { index: 1 })
        ));
    }

    #[test]
    fn test_error_k_too_large() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        let result = index.query(&[[1.0, 1.0]], 3);
        assert_eq!(result, Err(IndexError::InvalidK { k: 3, n_samples: 2 }));
    }

    #[test]
    fn test_error_k_zero() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        let mut scratch = QueryScratch::new(1);
        let result = index.query_point_with_scratch([1.0, 1.0], 0, &mut scratch);
        assert_eq!(result, Err(IndexError::InvalidK { k: 0, n_samples: 2 }));
    }

    #[test]
    fn test_error_non_finite_query() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        let result = index.query(&[[1.0, 1.0], [f64::INFINITY, 0.0]], 1);
        assert_eq!(result, Err(IndexError::NonFiniteQuery { index: 1 }));
    }

    #[test]
    fn test_empty_query_batch() {
        let index = SpatialIndex::build(&two_gauges(), &IndexConfig::new()).unwrap();
        let n = index.query(&[], 2).unwrap();
        assert_eq!(n.n_queries(), 0);
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SpatialIndex>();
    }
}
