use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sentinel child index marking a leaf node.
const TREE_LEAF: i64 = -1;

#[cfg_attr(test, mockall::automock)]
pub trait Regressor: Send + Sync {
    /// Width of each input row.
    fn n_features(&self) -> usize;

    /// One prediction per input row.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>>;
}

/// A fitted regression model as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(DecisionTreeRegressor),
    Linear(LinearRegression),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DecisionTree(_) => "decision_tree",
            Self::Linear(_) => "linear",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::DecisionTree(tree) => tree.validate(),
            Self::Linear(linear) => linear.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            Self::DecisionTree(tree) => tree.n_features(),
            Self::Linear(linear) => linear.n_features(),
        }
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        match self {
            Self::DecisionTree(tree) => tree.predict(rows),
            Self::Linear(linear) => linear.predict(rows),
        }
    }
}

/// Binary regression tree in flat parallel-array layout.
///
/// Node `i` splits on `feature[i]` at `threshold[i]`; samples with
/// `x[feature] <= threshold` go to `children_left[i]`, the rest to
/// `children_right[i]`. Leaves have both children set to `-1` and carry
/// their prediction in `value[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTreeRegressor {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(Error::artifact("decision tree has no nodes"));
        }
        if [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err(Error::artifact("decision tree node arrays differ in length"));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF && right == TREE_LEAF {
                if !self.value[node].is_finite() {
                    return Err(Error::artifact(format!(
                        "decision tree leaf {node} has a non-finite value"
                    )));
                }
                continue;
            }

            // Children always follow their parent, which rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(Error::artifact(format!(
                        "decision tree node {node} has invalid child {child}"
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= self.n_features {
                return Err(Error::artifact(format!(
                    "decision tree node {node} splits on feature {feature} outside 0..{}",
                    self.n_features
                )));
            }
        }

        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        while self.children_left[node] != TREE_LEAF {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

impl Regressor for DecisionTreeRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter()
            .map(|row| {
                check_width(self.n_features, row)?;
                Ok(self.predict_row(row))
            })
            .collect()
    }
}

/// Ordinary least squares model: `coef · x + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn validate(&self) -> Result<()> {
        if self.coef.is_empty() {
            return Err(Error::artifact("linear model has no coefficients"));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(Error::artifact("linear model has non-finite parameters"));
        }
        Ok(())
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter()
            .map(|row| {
                check_width(self.coef.len(), row)?;
                let dot: f64 = self.coef.iter().zip(row).map(|(c, x)| c * x).sum();
                Ok(dot + self.intercept)
            })
            .collect()
    }
}

fn check_width(expected: usize, row: &[f64]) -> Result<()> {
    if row.len() != expected {
        return Err(Error::ShapeMismatch {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
