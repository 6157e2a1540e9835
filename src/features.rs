//! Feature extraction for cattle health model inference.
//!
//! The scaler and the classifier carry no field names at prediction time, so
//! every feature row must be built in the exact column order the model was
//! trained on. `FEATURE_COLUMNS` is the single source of truth for that
//! order; the persisted bundle stores it and refuses to load on a mismatch.

use crate::types::observation::HealthObservation;

/// Canonical feature column order shared by training and inference.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "body_temperature",
    "breed_type",
    "milk_production",
    "respiratory_rate",
    "walking_capacity",
    "heart_rate",
    "faecal_consistency",
];

/// Column indices into a feature row, matching `FEATURE_COLUMNS`.
pub mod col {
    pub const BODY_TEMPERATURE: usize = 0;
    pub const BREED_TYPE: usize = 1;
    pub const MILK_PRODUCTION: usize = 2;
    pub const RESPIRATORY_RATE: usize = 3;
    pub const WALKING_CAPACITY: usize = 4;
    pub const HEART_RATE: usize = 5;
    pub const FAECAL_CONSISTENCY: usize = 6;
}

/// Feature extractor that turns an observation into a model input row.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract a feature row in `FEATURE_COLUMNS` order.
    pub fn extract(&self, obs: &HealthObservation) -> Vec<f64> {
        vec![
            obs.temperature,
            obs.breed as f64,
            obs.milk,
            obs.respiratory,
            obs.walking,
            obs.heart_rate,
            obs.faecal as f64,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COLUMNS.len()
    }

    /// Get feature names in extraction order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
