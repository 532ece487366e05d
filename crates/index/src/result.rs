//! Output type for neighbor queries.

/// Result of a k-nearest-neighbor query over one or more points.
///
/// Stored as two flat row-major tables of shape `n_queries × k`. Row `q`
/// lists the neighbors of query `q`, nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbors {
    k: usize,
    /// Sample indices, `n_queries × k`.
    indices: Vec<usize>,
    /// Distances matching `indices`, `n_queries × k`.
    distances: Vec<f64>,
}

impl Neighbors {
    pub(crate) fn with_capacity(n_queries: usize, k: usize) -> Self {
        Self {
            k,
            indices: Vec::with_capacity(n_queries * k),
            distances: Vec::with_capacity(n_queries * k),
        }
    }

    pub(crate) fn push_row(&mut self, row: &[(f64, usize)]) {
        debug_assert_eq!(row.len(), self.k);
        for &(d, i) in row {
            self.indices.push(i);
            self.distances.push(d);
        }
    }

    /// Returns the number of neighbors per query.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the number of query rows.
    pub fn n_queries(&self) -> usize {
        if self.k == 0 {
            0
        } else {
            self.indices.len() / self.k
        }
    }

    /// Returns the neighbor indices of query `q`, nearest first.
    ///
    /// # Panics
    ///
    /// Panics if `q >= n_queries()`.
    pub fn indices(&self, q: usize) -> &[usize] {
        &self.indices[q * self.k..(q + 1) * self.k]
    }

    /// Returns the neighbor distances of query `q`, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `q >= n_queries()`.
    pub fn distances(&self, q: usize) -> &[f64] {
        &self.distances[q * self.k..(q + 1) * self.k]
    }

    /// Returns the flat `n_queries × k` index table.
    pub fn flat_indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the flat `n_queries × k` distance table.
    pub fn flat_distances(&self) -> &[f64] {
        &self.distances
    }

    /// Iterates over `(indices, distances)` rows in query order.
    pub fn rows(&self) -> impl Iterator<Item = (&[usize], &[f64])> {
        self.indices
            .chunks_exact(self.k)
            .zip(self.distances.chunks_exact(self.k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Neighbors {
        let mut n = Neighbors::with_capacity(2, 2);
        n.push_row(&[(0.5, 3), (1.5, 0)]);
        n.push_row(&[(0.0, 1), (2.0, 2)]);
        n
    }

    #[test]
    fn test_accessors() {
        let n = sample();
        assert_eq!(n.k(), 2);
        assert_eq!(n.n_queries(), 2);
        assert_eq!(n.indices(0), &[3, 0]);
        assert_eq!(n.distances(0), &[0.5, 1.5]);
        assert_eq!(n.indices(1), &[1, 2]);
        assert_eq!(n.distances(1), &[0.0, 2.0]);
    }

    #[test]
    fn test_flat_tables_are_row_major() {
        let n = sample();
        assert_eq!(n.flat_indices(), &[3, 0, 1, 2]);
        assert_eq!(n.flat_distances(), &[0.5, 1.5, 0.0, 2.0]);
    }

    #[test]
    fn test_rows_iterator() {
        let n = sample();
        let rows: Vec<_> = n.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], (&[1usize, 2][..], &[0.0, 2.0][..]));
    }
}
