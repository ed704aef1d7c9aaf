#![allow(dead_code)]

use axum::Router;
use house_price_api::{
    Result,
    config::{ArtifactsConfig, CorsConfig},
    model::{ColumnTransformer, ModelArtifact, PricePredictor},
    server,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Scales area/bedrooms/bathrooms and one-hot encodes mainroad into 5 features.
pub const PREPROCESSOR_JSON: &str = r#"
{
  "transformers": [
    {
      "kind": "standard_scaler",
      "columns": ["area", "bedrooms", "bathrooms"],
      "mean": [5150.0, 3.0, 1.5],
      "scale": [2170.0, 0.75, 0.5]
    },
    {
      "kind": "one_hot_encoder",
      "columns": ["mainroad"],
      "categories": [[0.0, 1.0]],
      "handle_unknown": "error"
    }
  ],
  "remainder": "drop"
}
"#;

/// scaled area <= 0
///   mainroad=yes <= 0.5 -> 3_000_000 else 3_900_000
/// otherwise
///   scaled bathrooms <= 0.75 -> 5_600_000 else 8_050_000
pub const MODEL_JSON: &str = r#"
{
  "kind": "decision_tree",
  "n_features": 5,
  "children_left":  [1, 2, -1, -1, 5, -1, -1],
  "children_right": [4, 3, -1, -1, 6, -1, -1],
  "feature":        [0, 4, -2, -2, 2, -2, -2],
  "threshold":      [0.0, 0.5, -2.0, -2.0, 0.75, -2.0, -2.0],
  "value":          [4900000.0, 3400000.0, 3000000.0, 3900000.0, 6800000.0, 5600000.0, 8050000.0]
}
"#;

/// Same layout as [`PREPROCESSOR_JSON`] but the encoder only knows mainroad=1.
pub const STRICT_ENCODER_PREPROCESSOR_JSON: &str = r#"
{
  "transformers": [
    {
      "kind": "standard_scaler",
      "columns": ["area", "bedrooms", "bathrooms"],
      "mean": [5150.0, 3.0, 1.5],
      "scale": [2170.0, 0.75, 0.5]
    },
    {
      "kind": "one_hot_encoder",
      "columns": ["mainroad"],
      "categories": [[1.0]]
    }
  ]
}
"#;

pub const LINEAR_MODEL_4_JSON: &str = r#"
{"kind": "linear", "coef": [100000.0, 50000.0, 25000.0, 300000.0], "intercept": 4000000.0}
"#;

/// Finite parameters whose output overflows for very large areas.
pub const STEEP_LINEAR_MODEL_JSON: &str = r#"
{"kind": "linear", "coef": [1e10, 0.0, 0.0, 0.0, 0.0], "intercept": 0.0}
"#;

pub fn predictor_from(preprocessor_json: &str, model_json: &str) -> Result<PricePredictor> {
    let preprocessor: ColumnTransformer = serde_json::from_str(preprocessor_json)?;
    preprocessor.validate()?;
    let model: ModelArtifact = serde_json::from_str(model_json)?;
    model.validate()?;
    PricePredictor::new(preprocessor, Box::new(model))
}

pub fn test_predictor() -> PricePredictor {
    predictor_from(PREPROCESSOR_JSON, MODEL_JSON).expect("fixture artifacts are valid")
}

/// Router over the fixture artifacts with the default allow-all CORS policy.
pub fn create_test_app() -> Router {
    create_test_app_with(test_predictor(), &CorsConfig::default())
}

pub fn create_test_app_with(predictor: PricePredictor, cors: &CorsConfig) -> Router {
    server::router(Arc::new(predictor), cors).expect("router builds")
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write both artifacts into `dir` and return a config pointing at them.
pub async fn write_artifacts(
    dir: &TempDir,
    preprocessor_json: &str,
    model_json: &str,
) -> Result<ArtifactsConfig> {
    let preprocessor_path = dir.path().join("preprocessor.json");
    let model_path = dir.path().join("model.json");
    fs::write(&preprocessor_path, preprocessor_json).await?;
    fs::write(&model_path, model_json).await?;

    Ok(ArtifactsConfig {
        preprocessor_path: preprocessor_path.to_string_lossy().to_string(),
        model_path: model_path.to_string_lossy().to_string(),
    })
}
