use super::types::{ErrorResponse, PredictionRequest, PredictionResponse};
use crate::{Error, features, model::PricePredictor};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PricePredictor>,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received prediction request: {:?}", request);

    let result = features::assemble(&request)
        .and_then(|features| state.predictor.predict(&features));

    match result {
        Ok(predicted_price) => {
            info!("Predicted price: {}", predicted_price);
            Ok(Json(PredictionResponse { predicted_price }))
        }
        Err(e) => Err(error_response(e)),
    }
}

fn error_response(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    if e.is_client_error() {
        warn!("Rejected prediction request: {}", e);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        );
    }

    error!("Failed to predict price: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Prediction error: {}", e),
        }),
    )
}
