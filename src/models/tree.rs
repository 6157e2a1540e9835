//! Binary CART decision tree with gini impurity splits.
//!
//! Trees are grown on bootstrap samples by the forest; each split considers
//! a random subset of feature columns. Nodes live in a flat arena so the
//! whole tree serializes as plain data.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Splits with a gini gain below this are not worth making.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum TreeNode {
    Leaf {
        /// Class probability distribution [p_healthy, p_unhealthy]
        proba: [f64; 2],
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits and per-split feature subsampling
#[derive(Debug, Clone)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl DecisionTree {
    /// Grow a tree on the given sample indices.
    pub(crate) fn fit(
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, y, indices.to_vec(), 0, params, rng);
        tree
    }

    fn grow(
        &mut self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(y, &indices);
        let node_id = self.nodes.len();

        let is_pure = counts[0] == 0.0 || counts[1] == 0.0;
        if depth >= params.max_depth || indices.len() < params.min_samples_split || is_pure {
            self.nodes.push(leaf_from_counts(counts));
            return node_id;
        }

        let split = match best_split(x, y, &indices, params.max_features, rng) {
            Some(split) => split,
            None => {
                self.nodes.push(leaf_from_counts(counts));
                return node_id;
            }
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| x[i][split.feature] <= split.threshold);

        // A midpoint between two adjacent floats can round onto one of them
        // and sweep every sample to one side; fall back to a leaf.
        if left_idx.is_empty() || right_idx.is_empty() {
            self.nodes.push(leaf_from_counts(counts));
            return node_id;
        }

        // Placeholder children, patched after both subtrees are grown
        self.nodes.push(TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: 0,
            right: 0,
        });

        let left = self.grow(x, y, left_idx, depth + 1, params, rng);
        let right = self.grow(x, y, right_idx, depth + 1, params, rng);

        if let TreeNode::Split {
            left: l, right: r, ..
        } = &mut self.nodes[node_id]
        {
            *l = left;
            *r = right;
        }

        node_id
    }

    /// Class probability distribution for one row.
    pub fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                TreeNode::Leaf { proba } => return *proba,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn leaf_from_counts(counts: [f64; 2]) -> TreeNode {
    let total = counts[0] + counts[1];
    TreeNode::Leaf {
        proba: [counts[0] / total, counts[1] / total],
    }
}

fn class_counts(y: &[u8], indices: &[usize]) -> [f64; 2] {
    let mut counts = [0.0; 2];
    for &i in indices {
        counts[y[i] as usize] += 1.0;
    }
    counts
}

fn gini(counts: &[f64; 2]) -> f64 {
    let total = counts[0] + counts[1];
    if total == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] / total;
    let p1 = counts[1] / total;
    1.0 - p0 * p0 - p1 * p1
}

/// Find the best gini split over a random subset of features.
/// Returns `None` when no split improves on the parent impurity.
fn best_split(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    max_features: usize,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let n_features = x[0].len();
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);
    features.truncate(max_features.min(n_features).max(1));

    let total = class_counts(y, indices);
    let n = indices.len() as f64;
    let parent_gini = gini(&total);

    let mut best: Option<SplitCandidate> = None;

    for &feature in &features {
        let mut values: Vec<(f64, u8)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
        values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left = [0.0; 2];
        for w in 0..values.len() - 1 {
            left[values[w].1 as usize] += 1.0;
            if values[w].0 == values[w + 1].0 {
                continue;
            }

            let right = [total[0] - left[0], total[1] - left[1]];
            let n_left = left[0] + left[1];
            let n_right = right[0] + right[1];
            let weighted = (n_left / n) * gini(&left) + (n_right / n) * gini(&right);
            let gain = parent_gini - weighted;

            if gain > MIN_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (values[w].0 + values[w + 1].0) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 8,
            min_samples_split: 2,
            max_features: 2,
        }
    }

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64, (i % 3) as f64])
            .collect();
        let y: Vec<u8> = (0..20).map(|i| u8::from(i >= 10)).collect();
        (x, y)
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable_data();
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(0);

        let tree = DecisionTree::fit(&x, &y, &indices, &params(), &mut rng);

        for (row, &label) in x.iter().zip(&y) {
            let proba = tree.predict_proba(row);
            let predicted = u8::from(proba[1] > proba[0]);
            assert_eq!(predicted, label);
        }
    }

    #[test]
    fn test_pure_node_becomes_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1, 1, 1];
        let indices = vec![0, 1, 2];
        let mut rng = StdRng::seed_from_u64(0);

        let tree = DecisionTree::fit(&x, &y, &indices, &params(), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_proba(&[2.0]), [0.0, 1.0]);
    }

    #[test]
    fn test_proba_sums_to_one() {
        let (x, y) = separable_data();
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::fit(&x, &y, &indices, &params(), &mut rng);

        for row in &x {
            let proba = tree.predict_proba(row);
            assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        }
    }
}
