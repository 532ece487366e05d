//! Bounded top-k neighbor selection.

use std::cmp::Ordering;

use crate::config::DistanceMetric;
use crate::distance::distance;

/// The k best `(distance, sample index)` pairs seen so far.
///
/// Kept sorted ascending by distance, ties broken by ascending sample
/// index, so every strategy that offers the same candidates ends with the
/// same selection. A sorted `Vec` beats a binary heap for the small k used
/// in interpolation (typically 4–16).
#[derive(Debug, Clone, Default)]
pub(crate) struct Candidates {
    k: usize,
    items: Vec<(f64, usize)>,
}

impl Candidates {
    pub(crate) fn with_capacity(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k + 1),
        }
    }

    /// Empties the selection and sets a new k. Capacity is kept.
    pub(crate) fn reset(&mut self, k: usize) {
        self.k = k;
        self.items.clear();
    }

    /// Distance of the current k-th best, or infinity while not yet full.
    #[inline]
    pub(crate) fn worst(&self) -> f64 {
        if self.items.len() < self.k {
            f64::INFINITY
        } else {
            self.items.last().map_or(f64::INFINITY, |&(d, _)| d)
        }
    }

    /// Offers a candidate; keeps it only if it ranks among the k best.
    #[inline]
    pub(crate) fn offer(&mut self, dist: f64, index: usize) {
        if self.k == 0 {
            return;
        }
        if self.items.len() == self.k {
            match self.items.last() {
                Some(&worst) if precedes((dist, index), worst) => {
                    self.items.pop();
                }
                _ => return,
            }
        }
        let pos = self
            .items
            .partition_point(|&item| precedes(item, (dist, index)));
        self.items.insert(pos, (dist, index));
    }

    pub(crate) fn items(&self) -> &[(f64, usize)] {
        &self.items
    }
}

/// Strict ranking: smaller distance first, then smaller sample index.
#[inline]
fn precedes(a: (f64, usize), b: (f64, usize)) -> bool {
    match a.0.total_cmp(&b.0) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => a.1 < b.1,
    }
}

/// Offers every sample to `candidates`.
pub(crate) fn scan_linear(
    coords: &[[f64; 2]],
    metric: DistanceMetric,
    query: [f64; 2],
    candidates: &mut Candidates,
) {
    for (i, &c) in coords.iter().enumerate() {
        candidates.offer(distance(metric, c, query), i);
    }
}
