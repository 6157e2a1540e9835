//! Synthetic cattle health dataset generation.
//!
//! Samples are drawn from two latent groups (healthy-leaning and
//! unhealthy-leaning Gaussians), but the label is derived afterwards from the
//! drawn values by a fixed threshold rule. A healthy-leaning draw that
//! crosses a threshold is labeled unhealthy; that overlap is intentional and
//! is what gives the classifier something nontrivial to learn.

use crate::config::DatasetConfig;
use crate::features::{col, FEATURE_COLUMNS};
use anyhow::{ensure, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::info;

/// Class index for healthy animals
pub const HEALTHY: u8 = 0;
/// Class index for unhealthy animals
pub const UNHEALTHY: u8 = 1;

/// Per-group normal distribution parameters: (mean, std) for the
/// healthy-leaning and unhealthy-leaning groups, indexed by feature column.
const GROUP_DISTRIBUTIONS: [(usize, (f64, f64), (f64, f64)); 5] = [
    (col::BODY_TEMPERATURE, (38.5, 0.5), (40.0, 0.8)),
    (col::MILK_PRODUCTION, (20.0, 4.0), (8.0, 3.0)),
    (col::RESPIRATORY_RATE, (30.0, 5.0), (45.0, 10.0)),
    (col::WALKING_CAPACITY, (12000.0, 2000.0), (6000.0, 3000.0)),
    (col::HEART_RATE, (60.0, 10.0), (80.0, 15.0)),
];

/// Categorical weights for the faecal consistency score {0..4}
const FAECAL_WEIGHTS: [f64; 5] = [0.70, 0.10, 0.10, 0.05, 0.05];

/// Labeled training table in feature-column order
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    /// Feature rows, each in `FEATURE_COLUMNS` order
    pub rows: Vec<Vec<f64>>,
    /// Binary labels, 0 = healthy, 1 = unhealthy
    pub labels: Vec<u8>,
}

impl TrainingData {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count samples per class
    pub fn class_counts(&self) -> [usize; 2] {
        let unhealthy = self.labels.iter().filter(|&&l| l == UNHEALTHY).count();
        [self.labels.len() - unhealthy, unhealthy]
    }
}

/// Stratified train/test partition
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<u8>,
}

/// Derive the health label from raw feature values.
///
/// An animal is unhealthy when any one of the four thresholds is crossed.
/// These comparisons and constants are the labeling contract.
pub fn derive_label(row: &[f64]) -> u8 {
    let unhealthy = row[col::BODY_TEMPERATURE] > 39.5
        || row[col::MILK_PRODUCTION] < 10.0
        || row[col::RESPIRATORY_RATE] > 40.0
        || row[col::WALKING_CAPACITY] < 8000.0;
    if unhealthy {
        UNHEALTHY
    } else {
        HEALTHY
    }
}

/// Generate a reproducible synthetic dataset.
///
/// The same seed always produces a bit-identical table.
pub fn synthesize(config: &DatasetConfig) -> Result<TrainingData> {
    let n_samples = config.healthy_group + config.unhealthy_group;
    ensure!(n_samples > 0, "dataset group sizes must not both be zero");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut columns = vec![vec![0.0f64; n_samples]; FEATURE_COLUMNS.len()];

    // Numeric features, column by column: healthy-leaning draws first,
    // then unhealthy-leaning draws.
    for &(feature, (h_mean, h_std), (u_mean, u_std)) in &GROUP_DISTRIBUTIONS {
        let healthy_dist = Normal::new(h_mean, h_std)?;
        let unhealthy_dist = Normal::new(u_mean, u_std)?;
        for i in 0..config.healthy_group {
            columns[feature][i] = healthy_dist.sample(&mut rng);
        }
        for i in config.healthy_group..n_samples {
            columns[feature][i] = unhealthy_dist.sample(&mut rng);
        }
    }

    // Breed type: uniform over {0, 1}
    for value in &mut columns[col::BREED_TYPE] {
        *value = rng.gen_range(0..=1) as f64;
    }

    // Faecal consistency: weighted categorical over {0..4}
    let faecal_dist = WeightedIndex::new(FAECAL_WEIGHTS)?;
    for value in &mut columns[col::FAECAL_CONSISTENCY] {
        *value = faecal_dist.sample(&mut rng) as f64;
    }

    let rows: Vec<Vec<f64>> = (0..n_samples)
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect();
    let labels: Vec<u8> = rows.iter().map(|row| derive_label(row)).collect();

    let data = TrainingData { rows, labels };
    let counts = data.class_counts();
    info!(
        samples = n_samples,
        healthy = counts[0],
        unhealthy = counts[1],
        seed = config.seed,
        "Synthetic dataset generated"
    );

    Ok(data)
}

/// Split the dataset into disjoint train/test subsets, preserving the class
/// proportions. Fails if either class is too small to stratify.
pub fn stratified_split(data: &TrainingData, test_fraction: f64, seed: u64) -> Result<TrainTestSplit> {
    ensure!(
        test_fraction > 0.0 && test_fraction < 1.0,
        "test_fraction must be in (0, 1), got {test_fraction}"
    );

    let mut by_class: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, &label) in data.labels.iter().enumerate() {
        by_class[label as usize].push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = TrainTestSplit {
        x_train: Vec::new(),
        y_train: Vec::new(),
        x_test: Vec::new(),
        y_test: Vec::new(),
    };

    for (class, indices) in by_class.iter_mut().enumerate() {
        ensure!(
            indices.len() >= 2,
            "class {class} has {} sample(s); stratified split needs at least 2 per class",
            indices.len()
        );

        use rand::seq::SliceRandom;
        indices.shuffle(&mut rng);

        let n_test = ((indices.len() as f64 * test_fraction).round() as usize)
            .max(1)
            .min(indices.len() - 1);

        for (pos, &i) in indices.iter().enumerate() {
            if pos < n_test {
                split.x_test.push(data.rows[i].clone());
                split.y_test.push(data.labels[i]);
            } else {
                split.x_train.push(data.rows[i].clone());
                split.y_train.push(data.labels[i]);
            }
        }
    }

    info!(
        train = split.x_train.len(),
        test = split.x_test.len(),
        "Stratified split complete"
    );

    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_is_deterministic() {
        let config = DatasetConfig::default();
        let a = synthesize(&config).unwrap();
        let b = synthesize(&config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_changes_data() {
        let a = synthesize(&DatasetConfig::default()).unwrap();
        let b = synthesize(&DatasetConfig {
            seed: 43,
            ..DatasetConfig::default()
        })
        .unwrap();

        assert_ne!(a.rows, b.rows);
    }

    #[test]
    fn test_sample_count_and_feature_width() {
        let data = synthesize(&DatasetConfig::default()).unwrap();

        assert_eq!(data.len(), 200);
        assert!(data.rows.iter().all(|row| row.len() == FEATURE_COLUMNS.len()));
    }

    #[test]
    fn test_labels_follow_threshold_rule() {
        let data = synthesize(&DatasetConfig::default()).unwrap();

        for (row, &label) in data.rows.iter().zip(&data.labels) {
            let expected = if row[col::BODY_TEMPERATURE] > 39.5
                || row[col::MILK_PRODUCTION] < 10.0
                || row[col::RESPIRATORY_RATE] > 40.0
                || row[col::WALKING_CAPACITY] < 8000.0
            {
                UNHEALTHY
            } else {
                HEALTHY
            };
            assert_eq!(label, expected);
        }
    }

    #[test]
    fn test_categorical_features_stay_in_range() {
        let data = synthesize(&DatasetConfig::default()).unwrap();

        for row in &data.rows {
            let breed = row[col::BREED_TYPE];
            let faecal = row[col::FAECAL_CONSISTENCY];
            assert!(breed == 0.0 || breed == 1.0);
            assert!(faecal >= 0.0 && faecal <= 4.0 && faecal.fract() == 0.0);
        }
    }

    #[test]
    fn test_stratified_split_preserves_proportions() {
        let data = synthesize(&DatasetConfig::default()).unwrap();
        let split = stratified_split(&data, 0.2, 42).unwrap();

        assert_eq!(split.x_train.len() + split.x_test.len(), data.len());
        assert_eq!(split.x_train.len(), split.y_train.len());
        assert_eq!(split.x_test.len(), split.y_test.len());

        let test_fraction = split.x_test.len() as f64 / data.len() as f64;
        assert!((test_fraction - 0.2).abs() < 0.02);

        let overall = data.class_counts()[1] as f64 / data.len() as f64;
        let in_test = split.y_test.iter().filter(|&&l| l == UNHEALTHY).count() as f64
            / split.y_test.len() as f64;
        assert!((in_test - overall).abs() < 0.05);
    }

    #[test]
    fn test_split_is_seeded() {
        let data = synthesize(&DatasetConfig::default()).unwrap();
        let a = stratified_split(&data, 0.2, 42).unwrap();
        let b = stratified_split(&data, 0.2, 42).unwrap();

        assert_eq!(a.x_test, b.x_test);
        assert_eq!(a.y_train, b.y_train);
    }

    #[test]
    fn test_split_rejects_degenerate_class() {
        let data = TrainingData {
            rows: vec![vec![0.0; FEATURE_COLUMNS.len()]; 10],
            labels: vec![HEALTHY; 10],
        };

        let err = stratified_split(&data, 0.2, 42).unwrap_err();
        assert!(err.to_string().contains("stratified split"));
    }
}
