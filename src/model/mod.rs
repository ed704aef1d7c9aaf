pub mod artifacts;
mod predictor;
mod preprocessor;
pub mod regressor;

pub use predictor::PricePredictor;
pub use preprocessor::{
    ColumnTransform, ColumnTransformer, HandleUnknown, OneHotEncoder, Passthrough, Remainder,
    StandardScaler,
};
pub use regressor::{DecisionTreeRegressor, LinearRegression, ModelArtifact, Regressor};
