//! Offline training driver.
//!
//! One-shot batch job: synthesize the dataset, split, scale, fit, evaluate,
//! and persist the model bundle. Any failure is fatal to the run; there is
//! no retry. Inference instances only become ready after this completes.

use crate::config::AppConfig;
use crate::dataset;
use crate::metrics::EvaluationReport;
use crate::models::bundle::ModelBundle;
use crate::models::forest::{ForestParams, RandomForestClassifier};
use crate::scaler::StandardScaler;
use anyhow::Result;
use tracing::info;

/// Result of a completed training run
pub struct TrainingOutcome {
    pub report: EvaluationReport,
    pub bundle: ModelBundle,
}

/// Train and evaluate a model without touching disk.
pub fn train(config: &AppConfig) -> Result<(ModelBundle, EvaluationReport)> {
    let data = dataset::synthesize(&config.dataset)?;

    let split = dataset::stratified_split(
        &data,
        config.training.test_fraction,
        config.training.split_seed,
    )?;

    // Scaler parameters come from the training subset only
    let scaler = StandardScaler::fit(&split.x_train)?;
    let x_train = scaler.transform(&split.x_train);
    let x_test = scaler.transform(&split.x_test);

    let forest = RandomForestClassifier::fit(
        &x_train,
        &split.y_train,
        &ForestParams {
            trees: config.training.trees,
            max_depth: config.training.max_depth,
            min_samples_split: 2,
            seed: config.training.forest_seed,
        },
    )?;

    let y_pred: Vec<u8> = x_test.iter().map(|row| forest.predict(row)).collect();
    let report = EvaluationReport::compute(&split.y_test, &y_pred);
    info!(
        accuracy = report.accuracy,
        test_samples = report.total,
        "Evaluation complete"
    );

    Ok((ModelBundle::new(forest, scaler), report))
}

/// Full training run: train, evaluate, and serialize the bundle to the
/// configured path, overwriting any previous bundle there.
pub fn run(config: &AppConfig) -> Result<TrainingOutcome> {
    let (bundle, report) = train(config)?;
    bundle.save(&config.training.bundle_path)?;
    Ok(TrainingOutcome { report, bundle })
}
