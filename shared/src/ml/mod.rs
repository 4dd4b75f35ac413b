//! Yield-prediction engine
//!
//! Preprocessing pipeline (label encoding + standardization), the three-model
//! tree ensemble, the dispersion-based confidence estimator, and the
//! rule-based fallback predictor used whenever no trained model is available.

pub mod artifact;
pub mod boosting;
pub mod confidence;
pub mod dataset;
pub mod ensemble;
pub mod fallback;
pub mod forest;
pub mod model;
pub mod pipeline;
pub mod synthetic;
pub mod tree;

pub use artifact::{load_artifact, save_artifact};
pub use confidence::estimate_confidence;
pub use dataset::TrainingData;
pub use ensemble::{EnsembleMetrics, YieldEnsemble};
pub use fallback::FallbackPredictor;
pub use model::{ModelHandle, PredictionOutcome, TrainedYieldModel, YieldModel};
pub use pipeline::{FeatureFrame, FeaturePipeline};

use thiserror::Error;

/// Errors from the prediction engine
#[derive(Debug, Error)]
pub enum MlError {
    /// Invalid or empty training data; fatal to the training call
    #[error("invalid training data: {0}")]
    InvalidTrainingData(String),

    /// A categorical value could not be resolved to a code. The pipeline
    /// substitutes unseen labels before encoding, so this is a defensive path.
    #[error("cannot encode label '{label}' for feature '{feature}'")]
    UnknownLabel { feature: String, label: String },

    /// An inference row is missing a feature the fitted pipeline expects
    #[error("missing required feature '{0}'")]
    MissingFeature(String),

    /// A feature value has the wrong kind (label where a number is expected,
    /// or the reverse)
    #[error("feature '{feature}' expects a {expected} value")]
    InvalidFeatureValue {
        feature: String,
        expected: &'static str,
    },

    /// Artifact or dataset I/O failure
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact serialization failure
    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dataset parsing failure
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Persisted artifact written by an incompatible version
    #[error("unsupported artifact format version {0}")]
    IncompatibleArtifact(u32),
}
