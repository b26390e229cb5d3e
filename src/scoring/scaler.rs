use serde::{Deserialize, Serialize};

use crate::error::{ArtifactKind, FatigueError, Result};

/// Frozen per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Checks a deserialized scaler before it is trusted.
    pub fn validate(&self) -> Result<()> {
        if self.mean.is_empty() {
            return Err(FatigueError::corrupt(ArtifactKind::Scaler, "empty mean vector"));
        }
        if self.mean.len() != self.scale.len() {
            return Err(FatigueError::corrupt(
                ArtifactKind::Scaler,
                format!(
                    "mean has {} entries but scale has {}",
                    self.mean.len(),
                    self.scale.len()
                ),
            ));
        }
        if let Some(idx) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(FatigueError::corrupt(
                ArtifactKind::Scaler,
                format!("non-finite mean at position {idx}"),
            ));
        }
        if let Some(idx) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(FatigueError::corrupt(
                ArtifactKind::Scaler,
                format!("scale at position {idx} must be finite and non-zero"),
            ));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(FatigueError::DimensionMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_standardizes_each_column() {
        let scaler = StandardScaler::new(vec![10.0, 0.5], vec![2.0, 0.25]).unwrap();
        let scaled = scaler.transform(&[14.0, 0.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -2.0]);
    }

    #[test]
    fn test_transform_rejects_wrong_length() {
        let scaler = StandardScaler::new(vec![0.0; 7], vec![1.0; 7]).unwrap();
        let err = scaler.transform(&[0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            FatigueError::DimensionMismatch {
                expected: 7,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_zero_scale_is_corrupt() {
        let err = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            FatigueError::CorruptArtifact {
                artifact: ArtifactKind::Scaler,
                ..
            }
        ));
    }

    #[test]
    fn test_length_disagreement_is_corrupt() {
        assert!(StandardScaler::new(vec![0.0, 0.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }
}
