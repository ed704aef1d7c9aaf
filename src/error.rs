use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Invalid value for '{field}': {value}")]
    InvalidFeature { field: String, value: String },

    #[error("Column not found in feature frame: {column}")]
    MissingColumn { column: String },

    #[error("Unknown category {value} for column '{column}'")]
    UnknownCategory { column: String, value: f64 },

    #[error("Shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    pub fn invalid_feature(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidFeature {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Errors caused by the request payload rather than by the loaded artifacts.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFeature { .. })
    }
}
