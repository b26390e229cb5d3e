pub mod artifacts;
pub mod model;
pub mod scaler;
pub mod scorer;

pub use artifacts::{ArtifactPaths, ScoringArtifacts};
pub use model::LinearModel;
pub use scaler::StandardScaler;
pub use scorer::{rank_importance, FatigueLevel, FeatureWeight, PredictionResult, Scorer};
