//! Data types for cattle health observations and assessments

pub mod assessment;
pub mod observation;

pub use assessment::{HealthAssessment, HealthLabel};
pub use observation::HealthObservation;
