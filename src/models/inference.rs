//! Health prediction service over a loaded model bundle.
//!
//! The bundle is loaded once at startup and never mutated afterwards, so a
//! `HealthPredictor` can be shared across threads behind an `Arc` with no
//! locking. When no bundle could be loaded the service runs degraded and
//! every prediction returns `InferenceError::ModelUnavailable` instead of
//! panicking.

use crate::features::FeatureExtractor;
use crate::models::bundle::ModelBundle;
use crate::types::assessment::{HealthAssessment, HealthLabel};
use crate::types::observation::HealthObservation;
use std::path::Path;
use tracing::{debug, info, warn};

/// Inference-time failures visible to the boundary layer
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("no model bundle loaded; train and save a bundle before serving")]
    ModelUnavailable,
}

/// Stateless predictor over an immutable, already-validated bundle
pub struct HealthPredictor {
    bundle: ModelBundle,
    extractor: FeatureExtractor,
}

impl HealthPredictor {
    /// Create a predictor from a loaded bundle.
    pub fn new(bundle: ModelBundle) -> Self {
        Self {
            bundle,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Predict the health status for one observation.
    ///
    /// Builds the feature row in contract order, applies the fitted scaler,
    /// then the classifier. Confidence is the maximum class probability.
    pub fn assess(&self, obs: &HealthObservation) -> HealthAssessment {
        let raw = self.extractor.extract(obs);
        let scaled = self.bundle.scaler.transform_row(&raw);
        let proba = self.bundle.model.predict_proba(&scaled);

        let (class, confidence) = if proba[1] > proba[0] {
            (1, proba[1])
        } else {
            (0, proba[0])
        };

        debug!(
            class = class,
            confidence = confidence,
            "Observation assessed"
        );

        HealthAssessment::new(HealthLabel::from_class(class), confidence)
    }

    /// Access to the underlying bundle (read-only).
    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }
}

/// Serving state: either a ready predictor or an explicit degraded mode
pub enum PredictorState {
    Ready(HealthPredictor),
    Unavailable,
}

impl PredictorState {
    /// Load a bundle from disk. A missing or invalid bundle yields the
    /// degraded state with a logged warning, never a panic.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match ModelBundle::load(&path) {
            Ok(bundle) => {
                info!(path = %path.as_ref().display(), "Predictor ready");
                PredictorState::Ready(HealthPredictor::new(bundle))
            }
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Model bundle not loaded; serving in degraded mode"
                );
                PredictorState::Unavailable
            }
        }
    }

    /// Predict, or report the distinct unavailable-model condition.
    pub fn predict(&self, obs: &HealthObservation) -> Result<HealthAssessment, InferenceError> {
        match self {
            PredictorState::Ready(predictor) => Ok(predictor.assess(obs)),
            PredictorState::Unavailable => Err(InferenceError::ModelUnavailable),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PredictorState::Ready(_))
    }
}
