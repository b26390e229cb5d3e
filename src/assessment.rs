use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{FatigueError, Result};
use crate::features::{FeatureEncoder, SessionForm};
use crate::log_warn;
use crate::scoring::{FeatureWeight, PredictionResult, Scorer, ScoringArtifacts};

const ENABLE_LOGS: bool = true;

/// Read-only handle the presentation layers call into.
///
/// Owns nothing mutable: artifacts are shared through an `Arc`, so tests
/// can inject fixture artifacts without any process globals.
#[derive(Debug, Clone)]
pub struct FatigueAssessor {
    encoder: FeatureEncoder,
    scorer: Scorer,
}

impl FatigueAssessor {
    pub fn new(artifacts: Arc<ScoringArtifacts>) -> Self {
        Self {
            encoder: FeatureEncoder::new(artifacts.schema().clone()),
            scorer: Scorer::new(artifacts),
        }
    }

    /// Load the artifacts named by `config`. Any failure here is fatal.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let artifacts = ScoringArtifacts::load(&config.artifact_paths(), config.strict_schema)?;
        Ok(Self::new(Arc::new(artifacts)))
    }

    /// Validate, encode and score one form submission.
    pub fn assess(&self, form: &SessionForm) -> Result<PredictionResult> {
        let row = self.encoder.encode(form).map_err(|err| {
            if let FatigueError::InvalidInput { field, reason } = &err {
                log_warn!("Rejected session input: {} ({})", field, reason);
            }
            err
        })?;
        self.scorer.score(&row)
    }

    pub fn importance(&self) -> &[FeatureWeight] {
        self.scorer.importance()
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }
}
