//! Configuration management for the cattle health pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthetic dataset generation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Number of samples drawn from the healthy-leaning distributions
    #[serde(default = "default_healthy_group")]
    pub healthy_group: usize,
    /// Number of samples drawn from the unhealthy-leaning distributions
    #[serde(default = "default_unhealthy_group")]
    pub unhealthy_group: usize,
    /// RNG seed; same seed yields a bit-identical dataset
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Model training parameters
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of samples held out for evaluation
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// RNG seed for the stratified train/test split
    #[serde(default = "default_seed")]
    pub split_seed: u64,
    /// Number of trees in the random forest
    #[serde(default = "default_trees")]
    pub trees: usize,
    /// Maximum tree depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// RNG seed for bootstrap sampling and split selection
    #[serde(default = "default_seed")]
    pub forest_seed: u64,
    /// Where the serialized model bundle is written
    #[serde(default = "default_bundle_path")]
    pub bundle_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_healthy_group() -> usize {
    140
}

fn default_unhealthy_group() -> usize {
    60
}

fn default_seed() -> u64 {
    42
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_trees() -> usize {
    100
}

fn default_max_depth() -> usize {
    16
}

fn default_bundle_path() -> String {
    "models/cattle_model.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            healthy_group: default_healthy_group(),
            unhealthy_group: default_unhealthy_group(),
            seed: default_seed(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            split_seed: default_seed(),
            trees: default_trees(),
            max_depth: default_max_depth(),
            forest_seed: default_seed(),
            bundle_path: default_bundle_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
