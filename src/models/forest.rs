//! Random forest classifier over standardized features.
//!
//! Bagged CART trees with sqrt(n_features) candidate columns per split.
//! Every tree gets its own RNG derived from the forest seed, so the trained
//! structure and the bootstrap samples are reproducible.

use crate::models::tree::{DecisionTree, TreeParams};
use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Forest hyperparameters
#[derive(Debug, Clone)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub trees: usize,
    /// Maximum depth per tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Seed for bootstrap sampling and split selection
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 16,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// Trained binary ensemble; immutable once fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForestClassifier {
    /// Train on standardized feature rows and binary labels.
    pub fn fit(x: &[Vec<f64>], y: &[u8], params: &ForestParams) -> Result<Self> {
        ensure!(!x.is_empty(), "cannot train on an empty dataset");
        ensure!(
            x.len() == y.len(),
            "feature rows ({}) and labels ({}) differ in length",
            x.len(),
            y.len()
        );
        ensure!(params.trees > 0, "forest needs at least one tree");

        let n = x.len();
        let n_features = x[0].len();
        let max_features = ((n_features as f64).sqrt().round() as usize).max(1);
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features,
        };

        let trees: Vec<DecisionTree> = (0..params.trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(x, y, &bootstrap, &tree_params, &mut rng)
            })
            .collect();

        info!(
            trees = trees.len(),
            samples = n,
            features = n_features,
            seed = params.seed,
            "Random forest trained"
        );

        Ok(Self { trees, n_features })
    }

    /// Average class probabilities across all trees: [p_healthy, p_unhealthy].
    /// The two entries always sum to 1.
    pub fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        debug_assert_eq!(row.len(), self.n_features);
        let mut proba = [0.0; 2];
        for tree in &self.trees {
            let p = tree.predict_proba(row);
            proba[0] += p[0];
            proba[1] += p[1];
        }
        let n = self.trees.len() as f64;
        [proba[0] / n, proba[1] / n]
    }

    /// Predicted class: 0 = healthy, 1 = unhealthy. Ties go to healthy.
    pub fn predict(&self, row: &[f64]) -> u8 {
        let proba = self.predict_proba(row);
        u8::from(proba[1] > proba[0])
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> ForestParams {
        ForestParams {
            trees: 25,
            ..ForestParams::default()
        }
    }

    /// Two well-separated clusters in three dimensions
    fn clustered_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..15 {
            let offset = (i % 5) as f64 * 0.1;
            x.push(vec![-1.0 - offset, -1.0 + offset, 0.5]);
            y.push(0);
            x.push(vec![1.0 + offset, 1.0 - offset, -0.5]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn test_learns_clustered_data() {
        let (x, y) = clustered_data();
        let forest = RandomForestClassifier::fit(&x, &y, &small_params()).unwrap();

        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(forest.predict(row), label);
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let (x, y) = clustered_data();
        let a = RandomForestClassifier::fit(&x, &y, &small_params()).unwrap();
        let b = RandomForestClassifier::fit(&x, &y, &small_params()).unwrap();

        let probes = [
            vec![0.0, 0.0, 0.0],
            vec![-0.8, -1.2, 0.4],
            vec![1.3, 0.9, -0.6],
        ];
        for probe in &probes {
            assert_eq!(a.predict_proba(probe), b.predict_proba(probe));
        }
    }

    #[test]
    fn test_seed_changes_model() {
        let (x, y) = clustered_data();
        let a = RandomForestClassifier::fit(&x, &y, &small_params()).unwrap();
        let b = RandomForestClassifier::fit(
            &x,
            &y,
            &ForestParams {
                seed: 1234,
                ..small_params()
            },
        )
        .unwrap();

        // Same data, different seed: some probe must get a different score
        let probes: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64 * 0.2 - 2.0, 0.3, 0.0])
            .collect();
        assert!(probes
            .iter()
            .any(|p| a.predict_proba(p) != b.predict_proba(p)));
    }

    #[test]
    fn test_confidence_bound() {
        let (x, y) = clustered_data();
        let forest = RandomForestClassifier::fit(&x, &y, &small_params()).unwrap();

        for row in &x {
            let proba = forest.predict_proba(row);
            let confidence = proba[0].max(proba[1]);
            assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
            assert!((0.5..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn test_fit_rejects_mismatched_lengths() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![0];
        assert!(RandomForestClassifier::fit(&x, &y, &small_params()).is_err());
    }
}
