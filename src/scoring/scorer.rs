use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{FatigueError, Result};
use crate::features::AlignedFeatureRow;
use crate::log_info;
use crate::scoring::{LinearModel, ScoringArtifacts};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FatigueLevel {
    Low,
    High,
}

impl FatigueLevel {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            FatigueLevel::High
        } else {
            FatigueLevel::Low
        }
    }

    /// Model label: 0 = low fatigue, 1 = high fatigue.
    pub fn label(&self) -> u8 {
        match self {
            FatigueLevel::Low => 0,
            FatigueLevel::High => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FatigueLevel::Low => "low",
            FatigueLevel::High => "high",
        }
    }
}

/// One model coefficient paired with its schema column.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub request_id: Uuid,
    pub scored_at: DateTime<Utc>,
    pub level: FatigueLevel,
    pub decision_score: f64,
    /// Logistic probability of high fatigue.
    pub probability: f64,
    /// Coefficients ordered from most negative to most positive.
    pub importance: Vec<FeatureWeight>,
}

impl PredictionResult {
    pub fn label(&self) -> u8 {
        self.level.label()
    }
}

/// Pair weights with names and stable-sort ascending by weight.
pub fn rank_importance<'a, I>(names: I, weights: &[f64]) -> Vec<FeatureWeight>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<FeatureWeight> = names
        .into_iter()
        .zip(weights.iter())
        .map(|(feature, weight)| FeatureWeight {
            feature: feature.to_string(),
            weight: *weight,
        })
        .collect();
    ranked.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    ranked
}

/// Applies the frozen scaler and linear model to aligned rows.
///
/// The importance ranking only depends on the model, so it is computed once
/// here rather than per request.
#[derive(Debug, Clone)]
pub struct Scorer {
    artifacts: Arc<ScoringArtifacts>,
    importance: Vec<FeatureWeight>,
}

impl Scorer {
    pub fn new(artifacts: Arc<ScoringArtifacts>) -> Self {
        let importance = rank_importance(
            artifacts.schema().names(),
            artifacts.model().coefficients(),
        );
        Self {
            artifacts,
            importance,
        }
    }

    pub fn artifacts(&self) -> &ScoringArtifacts {
        &self.artifacts
    }

    pub fn importance(&self) -> &[FeatureWeight] {
        &self.importance
    }

    pub fn score(&self, row: &AlignedFeatureRow) -> Result<PredictionResult> {
        let expected = self.artifacts.n_features();
        if row.len() != expected {
            return Err(FatigueError::DimensionMismatch {
                expected,
                actual: row.len(),
            });
        }

        let model = self.artifacts.model();
        let scaled = self.artifacts.scaler().transform(row.as_slice())?;
        let decision_score = model.decision_function(&scaled)?;
        let level = FatigueLevel::from_label(model.label_for_score(decision_score));

        let result = PredictionResult {
            request_id: Uuid::new_v4(),
            scored_at: Utc::now(),
            level,
            decision_score,
            probability: LinearModel::probability(decision_score),
            importance: self.importance.clone(),
        };

        log_info!(
            "Prediction {}: {} fatigue (score {:.3})",
            result.request_id,
            level.as_str(),
            decision_score
        );
        Ok(result)
    }
}
