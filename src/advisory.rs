//! Outbound context for the external advisory-text collaborator.
//!
//! The pipeline hands off a free-text prompt built from the prediction and
//! the raw measurements; the collaborator's protocol (HTTP, retries, model
//! choice) is not this crate's concern.

use crate::types::assessment::HealthAssessment;
use crate::types::observation::HealthObservation;

/// Default system prompt for the advisory collaborator
pub const SYSTEM_PROMPT: &str = "You are a practical cattle health assistant for African farmers. \
Give concise, actionable advice in 2-3 sentences. Use simple language. \
Do not prescribe medications. Advise contacting a veterinarian if serious.";

/// Build the free-text context the advisory collaborator consumes.
pub fn advisory_context(assessment: &HealthAssessment, obs: &HealthObservation) -> String {
    format!(
        "Health Status: {} (Confidence: {:.1}%)\n\
         Measurements:\n\
         - Body Temperature: {}°C\n\
         - Milk Production: {} liters\n\
         - Respiratory Rate: {} breaths/min\n\
         - Heart Rate: {} bpm\n\
         - Walking Capacity: {} steps\n\n\
         Provide practical advice for this cattle.",
        assessment.health_status.as_str().to_uppercase(),
        assessment.confidence * 100.0,
        obs.temperature,
        obs.milk,
        obs.respiratory,
        obs.heart_rate,
        obs.walking,
    )
}
