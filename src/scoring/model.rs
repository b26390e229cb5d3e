use serde::{Deserialize, Serialize};

use crate::error::{ArtifactKind, FatigueError, Result};

/// Frozen binary logistic-regression weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_classes")]
    classes: [u8; 2],
}

fn default_classes() -> [u8; 2] {
    [0, 1]
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            coefficients,
            intercept,
            classes: default_classes(),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(FatigueError::corrupt(ArtifactKind::Model, "no coefficients"));
        }
        if let Some(idx) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(FatigueError::corrupt(
                ArtifactKind::Model,
                format!("non-finite coefficient at position {idx}"),
            ));
        }
        if !self.intercept.is_finite() {
            return Err(FatigueError::corrupt(ArtifactKind::Model, "non-finite intercept"));
        }
        // Labels are interpreted as low (0) / high (1) fatigue downstream.
        if self.classes != [0, 1] {
            return Err(FatigueError::corrupt(
                ArtifactKind::Model,
                format!("classes must be [0, 1], got {:?}", self.classes),
            ));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Signed distance from the decision boundary: `w · x + b`.
    pub fn decision_function(&self, scaled: &[f64]) -> Result<f64> {
        if scaled.len() != self.n_features() {
            return Err(FatigueError::DimensionMismatch {
                expected: self.n_features(),
                actual: scaled.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }

    /// Positive class when the decision score is strictly above zero.
    pub fn predict(&self, scaled: &[f64]) -> Result<u8> {
        let score = self.decision_function(scaled)?;
        Ok(self.label_for_score(score))
    }

    pub fn label_for_score(&self, score: f64) -> u8 {
        if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }

    /// Probability of the positive class.
    pub fn probability(score: f64) -> f64 {
        1.0 / (1.0 + (-score).exp())
    }
}
