//! Cattle Health Pipeline Library
//!
//! Trains a binary health classifier on a synthetic cattle dataset and
//! serves predictions (label + confidence) from a persisted model bundle.

pub mod advisory;
pub mod config;
pub mod dataset;
pub mod features;
pub mod metrics;
pub mod models;
pub mod scaler;
pub mod training;
pub mod types;

pub use config::AppConfig;
pub use features::{FeatureExtractor, FEATURE_COLUMNS};
pub use metrics::EvaluationReport;
pub use models::bundle::ModelBundle;
pub use models::forest::RandomForestClassifier;
pub use models::inference::{HealthPredictor, InferenceError, PredictorState};
pub use scaler::StandardScaler;
pub use types::{
    assessment::{HealthAssessment, HealthLabel},
    observation::HealthObservation,
};
