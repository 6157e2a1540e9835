//! Inbound cattle measurements for health prediction

use serde::{Deserialize, Serialize};

/// A set of cattle measurements submitted for prediction.
///
/// Every field is optional on the wire. Missing fields fall back to values
/// resembling a typical healthy animal, so sparse input biases toward a
/// "healthy" prediction instead of failing. This leniency is deliberate:
/// farmers rarely have every measurement on hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthObservation {
    /// Body temperature in °C
    #[serde(default = "default_temperature", alias = "body_temperature")]
    pub temperature: f64,

    /// Breed type (0 or 1)
    #[serde(default, alias = "breed_type")]
    pub breed: i64,

    /// Milk production in liters per day
    #[serde(default = "default_milk", alias = "milk_production")]
    pub milk: f64,

    /// Respiratory rate in breaths per minute
    #[serde(default = "default_respiratory", alias = "respiratory_rate")]
    pub respiratory: f64,

    /// Walking capacity in steps per day
    #[serde(default = "default_walking", alias = "walking_capacity")]
    pub walking: f64,

    /// Heart rate in beats per minute
    #[serde(default = "default_heart_rate")]
    pub heart_rate: f64,

    /// Faecal consistency score (0..4)
    #[serde(default = "default_faecal", alias = "faecal_consistency")]
    pub faecal: i64,
}

fn default_temperature() -> f64 {
    38.5
}

fn default_milk() -> f64 {
    15.0
}

fn default_respiratory() -> f64 {
    30.0
}

fn default_walking() -> f64 {
    12000.0
}

fn default_heart_rate() -> f64 {
    60.0
}

fn default_faecal() -> i64 {
    1
}

impl Default for HealthObservation {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            breed: 0,
            milk: default_milk(),
            respiratory: default_respiratory(),
            walking: default_walking(),
            heart_rate: default_heart_rate(),
            faecal: default_faecal(),
        }
    }
}
