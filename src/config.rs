use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::scoring::ArtifactPaths;

pub const CONFIG_FILE_NAME: &str = "fatigue_insight.json";
pub const CONFIG_PATH_ENV: &str = "FATIGUE_INSIGHT_CONFIG";
pub const MODELS_DIR_ENV: &str = "FATIGUE_INSIGHT_MODELS_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts_dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub schema_file: String,
    /// Reject schemas that have no column for one of the encoder's features.
    pub strict_schema: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("models"),
            model_file: "fatigue_model.json".into(),
            scaler_file: "scaler.json".into(),
            schema_file: "feature_names.json".into(),
            strict_schema: true,
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Read a config file if it exists, otherwise fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Resolve the config the way the binary does: the file named by
    /// `FATIGUE_INSIGHT_CONFIG` (or `fatigue_insight.json`), then env overrides.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(env::var_os(MODELS_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    fn apply_env_overrides(&mut self, models_dir: Option<PathBuf>) {
        if let Some(dir) = models_dir {
            self.artifacts_dir = dir;
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifacts_dir.join(&self.model_file),
            scaler: self.artifacts_dir.join(&self.scaler_file),
            schema: self.artifacts_dir.join(&self.schema_file),
        }
    }
}
