use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::{Fuel, Transmission};

/// Raw form selections as submitted by the page. Categorical fields arrive
/// as their display strings ("Petrol", "Manual", ...); numeric fields are
/// already constrained by the widgets' min/max/step.
#[derive(Debug, Clone, Deserialize)]
pub struct CarInput {
    pub brand: String,
    pub year: i32,
    pub km_driven: u32,
    pub fuel: Fuel,
    pub transmission: Transmission,
    pub mileage: f32,
    pub engine: u32,
    pub max_power: u32,
    pub seats: u8,
}

#[derive(Debug, Serialize, Clone)]
pub struct PredictionOut {
    pub price: f64,
    pub message: String,
}

/// Everything that can go wrong between receiving validated selections and
/// producing a price. One taxonomy, one user-facing treatment: the handler
/// renders the description and the process keeps serving.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
    #[error("inference failed: {0}")]
    Inference(String),
}
