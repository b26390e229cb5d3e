use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{ArtifactKind, FatigueError, Result};

/// Feature name → value, before alignment.
pub type FeatureMap = HashMap<String, f64>;

/// Columns the encoder knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncodedFeature {
    SessionDuration,
    DecisionCount,
    UndoCount,
    ErrorRate,
    BreakTaken,
    TimeOfDayMorning,
    TimeOfDayAfternoon,
    TimeOfDayEvening,
}

impl EncodedFeature {
    pub const ALL: [EncodedFeature; 8] = [
        EncodedFeature::SessionDuration,
        EncodedFeature::DecisionCount,
        EncodedFeature::UndoCount,
        EncodedFeature::ErrorRate,
        EncodedFeature::BreakTaken,
        EncodedFeature::TimeOfDayMorning,
        EncodedFeature::TimeOfDayAfternoon,
        EncodedFeature::TimeOfDayEvening,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            EncodedFeature::SessionDuration => "session_duration",
            EncodedFeature::DecisionCount => "decision_count",
            EncodedFeature::UndoCount => "undo_count",
            EncodedFeature::ErrorRate => "error_rate",
            EncodedFeature::BreakTaken => "break_taken",
            EncodedFeature::TimeOfDayMorning => "time_of_day_Morning",
            EncodedFeature::TimeOfDayAfternoon => "time_of_day_Afternoon",
            EncodedFeature::TimeOfDayEvening => "time_of_day_Evening",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        EncodedFeature::ALL
            .into_iter()
            .find(|f| f.column_name() == name)
    }
}

/// How a schema position gets its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaColumn {
    /// Produced by the encoder.
    Encoded(EncodedFeature),
    /// Known to the model but never produced by the encoder; always 0.0.
    ZeroFilled(String),
}

impl SchemaColumn {
    pub fn name(&self) -> &str {
        match self {
            SchemaColumn::Encoded(feature) => feature.column_name(),
            SchemaColumn::ZeroFilled(name) => name,
        }
    }
}

/// Ordered column names the frozen model was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<SchemaColumn>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(FatigueError::corrupt(
                    ArtifactKind::Schema,
                    format!("empty column name at position {}", columns.len()),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(FatigueError::corrupt(
                    ArtifactKind::Schema,
                    format!("duplicate column '{name}'"),
                ));
            }

            let column = match EncodedFeature::from_column_name(&name) {
                Some(feature) => SchemaColumn::Encoded(feature),
                None => SchemaColumn::ZeroFilled(name),
            };
            columns.push(column);
        }

        if columns.is_empty() {
            return Err(FatigueError::corrupt(ArtifactKind::Schema, "no columns"));
        }

        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(SchemaColumn::name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Schema columns the encoder never fills.
    pub fn zero_filled(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                SchemaColumn::ZeroFilled(name) => Some(name.as_str()),
                SchemaColumn::Encoded(_) => None,
            })
            .collect()
    }

    /// Encoder columns the schema has no slot for. Their values get dropped.
    pub fn missing_encoded(&self) -> Vec<EncodedFeature> {
        EncodedFeature::ALL
            .into_iter()
            .filter(|f| !self.columns.contains(&SchemaColumn::Encoded(*f)))
            .collect()
    }

    /// Align a feature map to this schema, substituting 0.0 for absent names.
    /// Names in `values` that the schema does not know are ignored.
    pub fn reindex(&self, values: &FeatureMap) -> AlignedFeatureRow {
        let values = self
            .columns
            .iter()
            .map(|column| values.get(column.name()).copied().unwrap_or(0.0))
            .collect();
        AlignedFeatureRow { values }
    }
}

/// Numeric row in schema order. Carries no column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFeatureRow {
    values: Vec<f64>,
}

impl AlignedFeatureRow {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Look a value up by column name through the schema it was aligned to.
    pub fn value_of(&self, schema: &FeatureSchema, name: &str) -> Option<f64> {
        schema
            .position(name)
            .and_then(|idx| self.values.get(idx).copied())
    }

    pub fn to_feature_map(&self, schema: &FeatureSchema) -> FeatureMap {
        schema
            .names()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}
