//! Fitted column transformer applied to a [`FeatureFrame`] before inference.
//!
//! Each transformer selects columns by name and emits a block of output
//! features; blocks are concatenated in declaration order, followed by the
//! remainder columns when `remainder` is `passthrough`.

use crate::{Error, Result, features::FeatureFrame};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    pub transformers: Vec<ColumnTransform>,
    #[serde(default)]
    pub remainder: Remainder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remainder {
    #[default]
    Drop,
    Passthrough,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnTransform {
    StandardScaler(StandardScaler),
    OneHotEncoder(OneHotEncoder),
    Passthrough(Passthrough),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub columns: Vec<String>,
    pub categories: Vec<Vec<f64>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    /// Per column, the category index left out of the output.
    #[serde(default)]
    pub drop_idx: Option<Vec<Option<usize>>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passthrough {
    pub columns: Vec<String>,
}

impl ColumnTransformer {
    /// Structural checks run once at load time.
    pub fn validate(&self) -> Result<()> {
        if self.transformers.is_empty() && self.remainder == Remainder::Drop {
            return Err(Error::artifact("column transformer produces no features"));
        }

        for transform in &self.transformers {
            transform.validate()?;
        }

        Ok(())
    }

    /// Number of output features produced for a frame with the given columns.
    pub fn output_width(&self, columns: &[&str]) -> usize {
        let selected: usize = self.transformers.iter().map(ColumnTransform::width).sum();
        match self.remainder {
            Remainder::Drop => selected,
            Remainder::Passthrough => {
                selected
                    + columns
                        .iter()
                        .filter(|column| !self.references(column))
                        .count()
            }
        }
    }

    pub fn transform(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>> {
        let remainder = match self.remainder {
            Remainder::Drop => Vec::new(),
            Remainder::Passthrough => frame
                .columns()
                .iter()
                .enumerate()
                .filter(|(_, column)| !self.references(column))
                .map(|(index, _)| index)
                .collect(),
        };

        frame
            .rows()
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(row.len() + remainder.len());
                for transform in &self.transformers {
                    transform.transform_row(frame, row, &mut out)?;
                }
                out.extend(remainder.iter().map(|&index| row[index]));
                Ok(out)
            })
            .collect()
    }

    fn references(&self, column: &str) -> bool {
        self.transformers
            .iter()
            .any(|t| t.columns().iter().any(|c| c == column))
    }
}

impl ColumnTransform {
    pub fn columns(&self) -> &[String] {
        match self {
            Self::StandardScaler(t) => &t.columns,
            Self::OneHotEncoder(t) => &t.columns,
            Self::Passthrough(t) => &t.columns,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::StandardScaler(t) => t.columns.len(),
            Self::OneHotEncoder(t) => t.width(),
            Self::Passthrough(t) => t.columns.len(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.columns().is_empty() {
            return Err(Error::artifact("transformer selects no columns"));
        }
        match self {
            Self::StandardScaler(t) => t.validate(),
            Self::OneHotEncoder(t) => t.validate(),
            Self::Passthrough(_) => Ok(()),
        }
    }

    fn transform_row(&self, frame: &FeatureFrame, row: &[f64], out: &mut Vec<f64>) -> Result<()> {
        for (position, column) in self.columns().iter().enumerate() {
            let index = frame
                .column_index(column)
                .ok_or_else(|| Error::MissingColumn {
                    column: column.clone(),
                })?;
            let value = row[index];

            match self {
                Self::StandardScaler(t) => out.push((value - t.mean[position]) / t.scale[position]),
                Self::OneHotEncoder(t) => t.encode(position, value, out)?,
                Self::Passthrough(_) => out.push(value),
            }
        }
        Ok(())
    }
}

impl StandardScaler {
    fn validate(&self) -> Result<()> {
        let n = self.columns.len();
        if self.mean.len() != n || self.scale.len() != n {
            return Err(Error::artifact(format!(
                "standard_scaler has {} columns but {} means and {} scales",
                n,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(scale) = self.scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(Error::artifact(format!(
                "standard_scaler scale must be finite and non-zero, got {scale}"
            )));
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(Error::artifact("standard_scaler mean must be finite"));
        }
        Ok(())
    }
}

impl OneHotEncoder {
    fn validate(&self) -> Result<()> {
        if self.categories.len() != self.columns.len() {
            return Err(Error::artifact(format!(
                "one_hot_encoder has {} columns but {} category lists",
                self.columns.len(),
                self.categories.len()
            )));
        }
        if self.categories.iter().any(Vec::is_empty) {
            return Err(Error::artifact("one_hot_encoder has an empty category list"));
        }
        if let Some(drop_idx) = &self.drop_idx {
            if drop_idx.len() != self.columns.len() {
                return Err(Error::artifact(format!(
                    "one_hot_encoder drop_idx has {} entries for {} columns",
                    drop_idx.len(),
                    self.columns.len()
                )));
            }
            for (idx, categories) in drop_idx.iter().zip(&self.categories) {
                if matches!(idx, Some(i) if *i >= categories.len()) {
                    return Err(Error::artifact("one_hot_encoder drop_idx out of range"));
                }
            }
        }
        Ok(())
    }

    fn dropped(&self, position: usize) -> Option<usize> {
        self.drop_idx
            .as_ref()
            .and_then(|drop_idx| drop_idx[position])
    }

    fn width(&self) -> usize {
        self.categories
            .iter()
            .enumerate()
            .map(|(position, categories)| {
                categories.len() - usize::from(self.dropped(position).is_some())
            })
            .sum()
    }

    fn encode(&self, position: usize, value: f64, out: &mut Vec<f64>) -> Result<()> {
        let categories = &self.categories[position];
        let hit = categories.iter().position(|c| *c == value);

        if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
            return Err(Error::UnknownCategory {
                column: self.columns[position].clone(),
                value,
            });
        }

        let dropped = self.dropped(position);
        for index in 0..categories.len() {
            if Some(index) == dropped {
                continue;
            }
            out.push(if Some(index) == hit { 1.0 } else { 0.0 });
        }
        Ok(())
    }
}
