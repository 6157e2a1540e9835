//! Persisted model bundle: classifier, scaler, and feature order.
//!
//! The bundle is written once by the training driver and loaded read-only at
//! service startup. The stored feature-column list is checked against the
//! crate's contract on load, so a model trained with a different column order
//! fails loudly instead of corrupting predictions silently.

use crate::features::FEATURE_COLUMNS;
use crate::models::forest::RandomForestClassifier;
use crate::scaler::StandardScaler;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// The unit of model persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub model: RandomForestClassifier,
    pub scaler: StandardScaler,
    pub feature_columns: Vec<String>,
}

impl ModelBundle {
    /// Assemble a bundle from freshly trained components. The feature order
    /// is stamped from the crate-wide contract.
    pub fn new(model: RandomForestClassifier, scaler: StandardScaler) -> Self {
        Self {
            model,
            scaler,
            feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Write the bundle to disk, overwriting any previous file at the path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let file = File::create(path)
            .with_context(|| format!("failed to create model bundle at {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .context("failed to serialize model bundle")?;

        info!(path = %path.display(), trees = self.model.tree_count(), "Model bundle saved");
        Ok(())
    }

    /// Load and validate a bundle from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open model bundle at {}", path.display()))?;
        let bundle: ModelBundle = serde_json::from_reader(BufReader::new(file))
            .context("failed to parse model bundle")?;

        bundle.validate()?;
        info!(path = %path.display(), trees = bundle.model.tree_count(), "Model bundle loaded");
        Ok(bundle)
    }

    /// Check the stored feature order against the crate contract.
    fn validate(&self) -> Result<()> {
        let matches = self.feature_columns.len() == FEATURE_COLUMNS.len()
            && self
                .feature_columns
                .iter()
                .zip(FEATURE_COLUMNS.iter())
                .all(|(stored, expected)| stored == expected);
        if !matches {
            bail!(
                "feature column mismatch: bundle has {:?}, expected {:?}",
                self.feature_columns,
                FEATURE_COLUMNS
            );
        }
        if self.model.n_features() != FEATURE_COLUMNS.len()
            || self.scaler.n_features() != FEATURE_COLUMNS.len()
        {
            bail!(
                "bundle width mismatch: model has {} features, scaler has {}, expected {}",
                self.model.n_features(),
                self.scaler.n_features(),
                FEATURE_COLUMNS.len()
            );
        }
        Ok(())
    }
}
