//! Bucketed 2-D k-d tree.
//!
//! Nodes split at the median of the wider bounding-box axis until a slice
//! holds at most `leaf_size` samples. Samples are never moved; the tree
//! stores a permutation of sample indices and each leaf owns a contiguous
//! range of it.
//!
//! Reference: Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use crate::config::DistanceMetric;
use crate::distance::distance;
use crate::select::Candidates;

#[derive(Debug, Clone)]
enum Node {
    /// Samples `order[start..end]`.
    Leaf { start: usize, end: usize },
    /// Left subtree holds coordinates `<= value` on `axis`, right `>= value`.
    Split {
        axis: usize,
        value: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct KdTree {
    nodes: Vec<Node>,
    order: Vec<usize>,
}

impl KdTree {
    /// Builds a tree over `coords`. Coordinates must be finite and non-empty.
    ///
    /// Construction is O(N log N) via `select_nth_unstable_by`.
    pub(crate) fn build(coords: &[[f64; 2]], leaf_size: usize) -> Self {
        debug_assert!(!coords.is_empty());
        debug_assert!(leaf_size >= 1);

        let mut order: Vec<usize> = (0..coords.len()).collect();
        let mut nodes = Vec::with_capacity(2 * coords.len() / leaf_size + 1);
        build_node(coords, &mut order, 0, leaf_size, &mut nodes);
        Self { nodes, order }
    }

    pub(crate) fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, node: usize) -> usize {
        match self.nodes[node] {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(left).max(self.depth_from(right))
            }
        }
    }

    /// Offers every sample that may rank among the k nearest to `query`.
    ///
    /// A far subtree is skipped when its splitting plane lies beyond
    /// `worst / (1 + eps)`. The single-axis gap is a lower bound on every
    /// Minkowski distance to that subtree, so with `eps == 0` the search is
    /// exact.
    pub(crate) fn search(
        &self,
        coords: &[[f64; 2]],
        metric: DistanceMetric,
        eps: f64,
        query: [f64; 2],
        candidates: &mut Candidates,
    ) {
        self.search_node(0, coords, metric, 1.0 + eps, query, candidates);
    }

    fn search_node(
        &self,
        node: usize,
        coords: &[[f64; 2]],
        metric: DistanceMetric,
        slack: f64,
        query: [f64; 2],
        candidates: &mut Candidates,
    ) {
        match self.nodes[node] {
            Node::Leaf { start, end } => {
                for &i in &self.order[start..end] {
                    candidates.offer(distance(metric, coords[i], query), i);
                }
            }
            Node::Split {
                axis,
                value,
                left,
                right,
            } => {
                let diff = query[axis] - value;
                let (near, far) = if diff < 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };
                self.search_node(near, coords, metric, slack, query, candidates);
                // `<=` keeps equidistant samples reachable for the index tie-break.
                if diff.abs() * slack <= candidates.worst() {
                    self.search_node(far, coords, metric, slack, query, candidates);
                }
            }
        }
    }
}

/// Recursively builds the subtree over `order` (which starts at `start` in
/// the full permutation) and returns its node index.
fn build_node(
    coords: &[[f64; 2]],
    order: &mut [usize],
    start: usize,
    leaf_size: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let len = order.len();
    let node = nodes.len();

    if len <= leaf_size {
        nodes.push(Node::Leaf {
            start,
            end: start + len,
        });
        return node;
    }

    let (axis, spread) = widest_axis(coords, order);
    if spread <= 0.0 {
        // All samples coincide; no plane can separate them.
        nodes.push(Node::Leaf {
            start,
            end: start + len,
        });
        return node;
    }

    let mid = len / 2;
    order.select_nth_unstable_by(mid, |&a, &b| coords[a][axis].total_cmp(&coords[b][axis]));
    let value = coords[order[mid]][axis];

    // Placeholder, patched once both children exist.
    nodes.push(Node::Leaf { start, end: start });
    let (lo, hi) = order.split_at_mut(mid);
    let left = build_node(coords, lo, start, leaf_size, nodes);
    let right = build_node(coords, hi, start + mid, leaf_size, nodes);
    nodes[node] = Node::Split {
        axis,
        value,
        left,
        right,
    };
    node
}

/// Returns the axis with the larger coordinate spread and that spread.
fn widest_axis(coords: &[[f64; 2]], order: &[usize]) -> (usize, f64) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for &i in order {
        for axis in 0..2 {
            let v = coords[i][axis];
            min[axis] = min[axis].min(v);
            max[axis] = max[axis].max(v);
        }
    }
    let sx = max[0] - min[0];
    let sy = max[1] - min[1];
    if sx >= sy { (0, sx) } else { (1, sy) }
}
