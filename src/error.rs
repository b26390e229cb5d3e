use std::{fmt, path::PathBuf};

/// The three frozen files the scorer depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Scaler,
    Schema,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Schema => "feature schema",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error categories, used by the presentation layer to decide
/// between "fix your input" and "the app cannot run".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ArtifactLoad,
    InvalidInput,
    DimensionMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum FatigueError {
    /// A frozen artifact file is missing, unreadable or corrupt.
    #[error("failed to load {artifact} from {}: {reason}", .path.display())]
    ArtifactLoad {
        artifact: ArtifactKind,
        path: PathBuf,
        reason: String,
    },

    /// An in-memory artifact failed validation. Converted into
    /// `ArtifactLoad` once the originating file is known.
    #[error("{artifact} artifact is corrupt: {reason}")]
    CorruptArtifact {
        artifact: ArtifactKind,
        reason: String,
    },

    /// A form field violated its range or category constraint.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Schema, scaler and model disagree on the number of features.
    #[error("feature dimension mismatch: artifacts expect {expected} features, row has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl FatigueError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        FatigueError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(artifact: ArtifactKind, reason: impl Into<String>) -> Self {
        FatigueError::CorruptArtifact {
            artifact,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FatigueError::ArtifactLoad { .. } | FatigueError::CorruptArtifact { .. } => {
                ErrorKind::ArtifactLoad
            }
            FatigueError::InvalidInput { .. } => ErrorKind::InvalidInput,
            FatigueError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }

    /// Only input errors are safe to show back to the user for resubmission.
    pub fn is_user_facing(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// Attach the file a corrupt artifact was read from.
    pub(crate) fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            FatigueError::CorruptArtifact { artifact, reason } => FatigueError::ArtifactLoad {
                artifact,
                path: path.into(),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FatigueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = FatigueError::invalid_input("error_rate", "must be within [0, 1]");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.is_user_facing());

        let err = FatigueError::DimensionMismatch {
            expected: 7,
            actual: 8,
        };
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert!(!err.is_user_facing());

        let err = FatigueError::corrupt(ArtifactKind::Scaler, "empty mean vector");
        assert_eq!(err.kind(), ErrorKind::ArtifactLoad);
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_at_path_converts_corrupt_artifact() {
        let err = FatigueError::corrupt(ArtifactKind::Model, "classes must be [0, 1]")
            .at_path("models/fatigue_model.json");
        match err {
            FatigueError::ArtifactLoad {
                artifact,
                path,
                reason,
            } => {
                assert_eq!(artifact, ArtifactKind::Model);
                assert_eq!(path, PathBuf::from("models/fatigue_model.json"));
                assert_eq!(reason, "classes must be [0, 1]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_at_path_leaves_other_errors_alone() {
        let err = FatigueError::invalid_input("undo_count", "must be >= 0").at_path("x.json");
        assert!(matches!(err, FatigueError::InvalidInput { field: "undo_count", .. }));
    }

    #[test]
    fn test_display_names_field() {
        let err = FatigueError::invalid_input("session_duration", "must be at least 1 minute");
        assert_eq!(
            err.to_string(),
            "invalid session_duration: must be at least 1 minute"
        );
    }
}
