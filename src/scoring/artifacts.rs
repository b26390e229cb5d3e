use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;

use crate::error::{ArtifactKind, FatigueError, Result};
use crate::features::FeatureSchema;
use crate::scoring::{LinearModel, StandardScaler};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Where the three frozen artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPaths {
    /// Default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join("fatigue_model.json"),
            scaler: dir.join("scaler.json"),
            schema: dir.join("feature_names.json"),
        }
    }
}

/// Schema, scaler and model, validated against each other.
///
/// Built once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScoringArtifacts {
    schema: FeatureSchema,
    scaler: StandardScaler,
    model: LinearModel,
}

impl ScoringArtifacts {
    pub fn new(schema: FeatureSchema, scaler: StandardScaler, model: LinearModel) -> Result<Self> {
        if scaler.n_features() != model.n_features() {
            return Err(FatigueError::corrupt(
                ArtifactKind::Scaler,
                format!(
                    "scaler has {} features but model has {}",
                    scaler.n_features(),
                    model.n_features()
                ),
            ));
        }
        if schema.len() != model.n_features() {
            return Err(FatigueError::DimensionMismatch {
                expected: model.n_features(),
                actual: schema.len(),
            });
        }

        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    /// Read and cross-check all three artifacts.
    ///
    /// With `strict_schema`, a schema that has no slot for one of the
    /// encoder's columns is rejected instead of silently dropping the value.
    pub fn load(paths: &ArtifactPaths, strict_schema: bool) -> Result<Self> {
        let names: Vec<String> = read_json(ArtifactKind::Schema, &paths.schema)?;
        let schema = FeatureSchema::new(names).map_err(|e| e.at_path(&paths.schema))?;
        check_schema_drift(&schema, &paths.schema, strict_schema)?;

        let scaler: StandardScaler = read_json(ArtifactKind::Scaler, &paths.scaler)?;
        scaler.validate().map_err(|e| e.at_path(&paths.scaler))?;

        let model: LinearModel = read_json(ArtifactKind::Model, &paths.model)?;
        model.validate().map_err(|e| e.at_path(&paths.model))?;

        let artifacts = Self::new(schema, scaler, model).map_err(|e| e.at_path(&paths.scaler))?;

        log_info!(
            "Loaded scoring artifacts: {} features from {}",
            artifacts.n_features(),
            paths.schema.display()
        );
        Ok(artifacts)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }
}

fn read_json<T: DeserializeOwned>(artifact: ArtifactKind, path: &Path) -> Result<T> {
    let load_error = |reason: String| FatigueError::ArtifactLoad {
        artifact,
        path: path.to_path_buf(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| load_error(format!("malformed JSON: {e}")))
}

fn check_schema_drift(schema: &FeatureSchema, path: &Path, strict: bool) -> Result<()> {
    let zero_filled = schema.zero_filled();
    if !zero_filled.is_empty() {
        log_warn!(
            "Schema columns {:?} are not produced by the encoder and will always be 0",
            zero_filled
        );
    }

    let missing: Vec<&str> = schema
        .missing_encoded()
        .iter()
        .map(|f| f.column_name())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    if strict {
        return Err(FatigueError::ArtifactLoad {
            artifact: ArtifactKind::Schema,
            path: path.to_path_buf(),
            reason: format!("schema has no column for encoder features {missing:?}"),
        });
    }

    log_warn!(
        "Schema has no column for encoder features {:?}; their values will be dropped",
        missing
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"["session_duration", "decision_count", "undo_count", "error_rate",
        "break_taken", "time_of_day_Afternoon", "time_of_day_Evening", "time_of_day_Morning"]"#;
    const SCALER: &str = r#"{ "mean": [75.0, 40.0, 6.0, 0.2, 0.5, 0.33, 0.33, 0.34],
        "scale": [38.0, 21.0, 4.0, 0.1, 0.5, 0.47, 0.47, 0.47] }"#;
    const MODEL: &str = r#"{ "coefficients": [1.4, 0.9, 0.6, 1.2, -0.9, 0.05, 0.3, -0.3],
        "intercept": -0.1, "classes": [0, 1] }"#;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        let mut file = fs::File::create(dir.path().join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    fn artifact_dir(schema: &str, scaler: &str, model: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "feature_names.json", schema);
        write(&dir, "scaler.json", scaler);
        write(&dir, "fatigue_model.json", model);
        dir
    }

    fn load_err(dir: &TempDir, strict: bool) -> FatigueError {
        ScoringArtifacts::load(&ArtifactPaths::in_dir(dir.path()), strict).unwrap_err()
    }

    #[test]
    fn test_load_valid_artifacts() {
        let dir = artifact_dir(SCHEMA, SCALER, MODEL);
        let artifacts = ScoringArtifacts::load(&ArtifactPaths::in_dir(dir.path()), true).unwrap();
        assert_eq!(artifacts.n_features(), 8);
        assert_eq!(artifacts.schema().len(), 8);
        assert_eq!(artifacts.model().intercept(), -0.1);
    }

    #[test]
    fn test_missing_file_is_artifact_load_error() {
        let dir = artifact_dir(SCHEMA, SCALER, MODEL);
        fs::remove_file(dir.path().join("scaler.json")).unwrap();
        match load_err(&dir, true) {
            FatigueError::ArtifactLoad { artifact, path, .. } => {
                assert_eq!(artifact, ArtifactKind::Scaler);
                assert!(path.ends_with("scaler.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_artifact_load_error() {
        let dir = artifact_dir(SCHEMA, SCALER, "{ not json");
        match load_err(&dir, true) {
            FatigueError::ArtifactLoad {
                artifact, reason, ..
            } => {
                assert_eq!(artifact, ArtifactKind::Model);
                assert!(reason.starts_with("malformed JSON"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_scaler_reports_path() {
        let dir = artifact_dir(SCHEMA, r#"{ "mean": [1.0], "scale": [0.0] }"#, MODEL);
        match load_err(&dir, true) {
            FatigueError::ArtifactLoad { artifact, path, .. } => {
                assert_eq!(artifact, ArtifactKind::Scaler);
                assert!(path.ends_with("scaler.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scaler_model_disagreement_is_artifact_load_error() {
        let model = r#"{ "coefficients": [1.0, 1.0], "intercept": 0.0 }"#;
        let dir = artifact_dir(SCHEMA, SCALER, model);
        assert!(matches!(
            load_err(&dir, true),
            FatigueError::ArtifactLoad {
                artifact: ArtifactKind::Scaler,
                ..
            }
        ));
    }

    #[test]
    fn test_schema_longer_than_model_is_dimension_mismatch() {
        let schema = r#"["session_duration", "decision_count", "undo_count", "error_rate",
            "break_taken", "time_of_day_Afternoon", "time_of_day_Evening", "time_of_day_Morning",
            "weekday_Monday"]"#;
        let dir = artifact_dir(schema, SCALER, MODEL);
        assert!(matches!(
            load_err(&dir, true),
            FatigueError::DimensionMismatch {
                expected: 8,
                actual: 9
            }
        ));
    }

    #[test]
    fn test_strict_schema_rejects_missing_encoder_column() {
        let schema = r#"["session_duration", "decision_count", "undo_count", "error_rate",
            "break_taken", "time_of_day_Afternoon", "time_of_day_Evening", "weekday_Monday"]"#;
        let dir = artifact_dir(schema, SCALER, MODEL);

        match load_err(&dir, true) {
            FatigueError::ArtifactLoad {
                artifact, reason, ..
            } => {
                assert_eq!(artifact, ArtifactKind::Schema);
                assert!(reason.contains("time_of_day_Morning"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let lenient = ScoringArtifacts::load(&ArtifactPaths::in_dir(dir.path()), false).unwrap();
        assert_eq!(lenient.schema().zero_filled(), vec!["weekday_Monday"]);
    }

    #[test]
    fn test_new_checks_schema_against_model() {
        let schema = FeatureSchema::new([
            "session_duration",
            "decision_count",
            "undo_count",
            "error_rate",
            "break_taken",
            "time_of_day_Afternoon",
            "time_of_day_Evening",
            "time_of_day_Morning",
        ])
        .unwrap();
        let scaler = StandardScaler::new(vec![0.0; 7], vec![1.0; 7]).unwrap();
        let model = LinearModel::new(vec![0.1; 7], 0.0).unwrap();

        assert!(matches!(
            ScoringArtifacts::new(schema, scaler, model),
            Err(FatigueError::DimensionMismatch {
                expected: 7,
                actual: 8
            })
        ));
    }
}
