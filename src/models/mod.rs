//! Classification models and the inference service
//!
//! - `tree`: single CART decision tree
//! - `forest`: bagged ensemble over standardized features
//! - `bundle`: persisted {model, scaler, feature order} triple
//! - `inference`: prediction service over a loaded bundle

pub mod bundle;
pub mod forest;
pub mod inference;
pub mod tree;
