use super::{ColumnTransformer, ModelArtifact, PricePredictor};
use crate::{Error, Result, config::ArtifactsConfig};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Loads both artifacts and wires them into a predictor. Any failure here is fatal at startup.
pub async fn load(config: &ArtifactsConfig) -> Result<PricePredictor> {
    let preprocessor = load_preprocessor(&config.preprocessor_path).await?;
    let model = load_model(&config.model_path).await?;

    match &model {
        ModelArtifact::DecisionTree(tree) => info!(
            "Loaded decision_tree model from {} ({} nodes)",
            config.model_path,
            tree.node_count()
        ),
        ModelArtifact::Linear(_) => info!("Loaded linear model from {}", config.model_path),
    }

    PricePredictor::new(preprocessor, Box::new(model))
}

pub async fn load_preprocessor(path: impl AsRef<Path>) -> Result<ColumnTransformer> {
    let preprocessor: ColumnTransformer = read_artifact(path.as_ref()).await?;
    preprocessor
        .validate()
        .map_err(|e| with_path(path.as_ref(), e))?;

    info!(
        "Loaded preprocessor from {} ({} transformers)",
        path.as_ref().display(),
        preprocessor.transformers.len()
    );
    Ok(preprocessor)
}

pub async fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let model: ModelArtifact = read_artifact(path.as_ref()).await?;
    model.validate().map_err(|e| with_path(path.as_ref(), e))?;
    Ok(model)
}

async fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading artifact: {}", path.display());

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::artifact(format!("failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| Error::artifact(format!("failed to parse {}: {}", path.display(), e)))
}

fn with_path(path: &Path, error: Error) -> Error {
    match error {
        Error::Artifact(msg) => Error::artifact(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}
