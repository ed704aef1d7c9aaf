use serde::{Deserialize, Serialize};

pub use crate::features::HouseFeatures as PredictionRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
