//! Cattle Health Pipeline - Training Driver
//!
//! Offline batch job: synthesizes the training dataset, fits the scaler and
//! the random forest, prints the evaluation report, and writes the model
//! bundle. Finishes with a smoke prediction through the serving path.

use anyhow::Result;
use cattle_health_pipeline::{
    config::AppConfig, models::inference::PredictorState, training,
    types::observation::HealthObservation,
};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cattle_health_pipeline=info".parse()?),
        )
        .init();

    info!("Starting cattle health model training");

    let config = match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            warn!(error = %e, "No configuration file; using defaults");
            AppConfig::default()
        }
    };
    info!(
        samples = config.dataset.healthy_group + config.dataset.unhealthy_group,
        trees = config.training.trees,
        seed = config.dataset.seed,
        "Training parameters"
    );

    let outcome = training::run(&config)?;

    println!("Model Accuracy: {:.3}", outcome.report.accuracy);
    println!("\nClassification Report:");
    println!("{}", outcome.report);

    // Reload through the serving path to confirm the bundle round-trips
    let state = PredictorState::load(&config.training.bundle_path);
    let assessment = state.predict(&HealthObservation::default())?;
    info!(
        health_status = %assessment.health_status,
        confidence = assessment.confidence,
        "Baseline observation assessed; bundle is ready to serve"
    );

    Ok(())
}
