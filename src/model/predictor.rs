use super::{ColumnTransformer, Regressor};
use crate::{
    Error, Result,
    features::{FEATURE_COLUMNS, FeatureFrame, FeatureVector},
};
use tracing::debug;

/// Loaded preprocessor and model, shared read-only by every request.
pub struct PricePredictor {
    preprocessor: ColumnTransformer,
    model: Box<dyn Regressor>,
}

impl PricePredictor {
    pub fn new(preprocessor: ColumnTransformer, model: Box<dyn Regressor>) -> Result<Self> {
        preprocessor.validate()?;

        let width = preprocessor.output_width(&FEATURE_COLUMNS);
        if width != model.n_features() {
            return Err(Error::artifact(format!(
                "preprocessor emits {} features but model expects {}",
                width,
                model.n_features()
            )));
        }

        Ok(Self {
            preprocessor,
            model,
        })
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let predictions = self.predict_frame(&features.to_frame())?;

        let value = predictions
            .first()
            .copied()
            .ok_or_else(|| Error::prediction("model returned no predictions"))?;

        // Non-finite values would serialize as `null`
        if !value.is_finite() {
            return Err(Error::prediction(format!(
                "model returned a non-finite prediction: {value}"
            )));
        }

        Ok(value)
    }

    pub fn predict_frame(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        let processed = self.preprocessor.transform(frame)?;
        debug!("Processed {} rows: {:?}", frame.len(), processed);

        self.model.predict(&processed)
    }
}
