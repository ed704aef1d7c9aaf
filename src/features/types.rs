use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column order the preprocessor was fitted against.
pub const FEATURE_COLUMNS: [&str; 4] = ["area", "bedrooms", "bathrooms", "mainroad"];

/// Request payload describing one house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseFeatures {
    pub area: NumericValue,
    pub bedrooms: NumericValue,
    pub bathrooms: NumericValue,
    /// Required, but any JSON value is accepted; only `"yes"` counts as main-road access.
    pub mainroad: Value,
}

/// A numeric field as submitted by clients: either a JSON number or a form string like `"7420"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::invalid_feature(field, format!("{s:?}")))?,
        };

        if !value.is_finite() {
            return Err(Error::invalid_feature(field, value.to_string()));
        }

        Ok(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Assembled features in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub mainroad: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; 4] {
        [self.area, self.bedrooms, self.bathrooms, self.mainroad]
    }

    /// Wraps the vector as a single-row frame with named columns.
    pub fn to_frame(&self) -> FeatureFrame {
        FeatureFrame {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: vec![self.to_array().to_vec()],
        }
    }
}

/// Row-major table of numeric features with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(Error::ShapeMismatch {
                expected: columns.len(),
                actual: row.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
