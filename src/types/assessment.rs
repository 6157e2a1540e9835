//! Health assessment result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted health label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLabel {
    Healthy,
    Unhealthy,
}

impl HealthLabel {
    /// Map a classifier class index (0 = healthy, 1 = unhealthy) to a label.
    pub fn from_class(class: u8) -> Self {
        if class == 0 {
            HealthLabel::Healthy
        } else {
            HealthLabel::Unhealthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Healthy => "healthy",
            HealthLabel::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a health prediction for one observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Unique assessment identifier
    pub assessment_id: String,

    /// Predicted label
    pub health_status: HealthLabel,

    /// Maximum class probability, always in [0.5, 1.0] for a binary model
    pub confidence: f64,

    /// Assessment generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthAssessment {
    /// Create a new assessment
    pub fn new(health_status: HealthLabel, confidence: f64) -> Self {
        Self {
            assessment_id: uuid::Uuid::new_v4().to_string(),
            health_status,
            confidence,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(HealthLabel::from_class(0), HealthLabel::Healthy);
        assert_eq!(HealthLabel::from_class(1), HealthLabel::Unhealthy);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthLabel::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = HealthAssessment::new(HealthLabel::Healthy, 0.93);

        let json = serde_json::to_string(&assessment).unwrap();
        let deserialized: HealthAssessment = serde_json::from_str(&json).unwrap();

        assert_eq!(assessment.health_status, deserialized.health_status);
        assert_eq!(assessment.confidence, deserialized.confidence);
    }
}
