//! Model lifecycle: training, prediction routing, and snapshot swapping
//!
//! A model is either `Untrained` or `Trained`; predicting against an
//! untrained model is a supported path that routes to the rule-based
//! fallback, not an error. The pipeline, ensemble, and diagnostics travel
//! together as one unit so a loaded artifact can never mix preprocessing
//! state from one fit with trees from another.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::estimate_confidence;
use super::dataset::TrainingData;
use super::ensemble::{EnsembleMetrics, YieldEnsemble};
use super::fallback::FallbackPredictor;
use super::pipeline::FeaturePipeline;
use super::MlError;
use crate::models::{FeatureRow, ModelUsed};

/// A completed fit: frozen preprocessing state plus the fitted ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedYieldModel {
    pub pipeline: FeaturePipeline,
    pub ensemble: YieldEnsemble,
    pub metrics: EnsembleMetrics,
    pub trained_at: DateTime<Utc>,
}

/// A yield model in one of its two lifecycle states
#[derive(Debug, Clone, Default)]
pub enum YieldModel {
    #[default]
    Untrained,
    Trained(TrainedYieldModel),
}

/// One prediction: estimate, bounded confidence, and which predictor ran
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PredictionOutcome {
    pub predicted_yield: f64,
    pub confidence: f64,
    pub model_used: ModelUsed,
}

impl YieldModel {
    /// Train a new model from scratch
    ///
    /// Fits the preprocessing pipeline on the training frame, then fits the
    /// ensemble on the preprocessed matrix. Fails with invalid-training-data
    /// on empty or length-mismatched input; never mutates existing state.
    pub fn train(data: &TrainingData) -> Result<TrainedYieldModel, MlError> {
        if data.frame.n_rows() != data.targets.len() {
            return Err(MlError::InvalidTrainingData(format!(
                "frame has {} rows but {} targets were supplied",
                data.frame.n_rows(),
                data.targets.len()
            )));
        }

        let (pipeline, matrix) = FeaturePipeline::fit_transform(&data.frame)?;
        let (ensemble, metrics) = YieldEnsemble::fit(&matrix, &data.targets)?;

        Ok(TrainedYieldModel {
            pipeline,
            ensemble,
            metrics,
            trained_at: Utc::now(),
        })
    }

    /// Predict yield for a single raw input row
    ///
    /// Untrained models delegate to the fallback predictor. Trained models
    /// preprocess with frozen state and average the ensemble; an encoding
    /// failure (defensive, should be unreachable given unseen-label
    /// substitution) also routes to the fallback rather than propagating.
    /// Only a missing required feature is returned as an error.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionOutcome, MlError> {
        let trained = match self {
            YieldModel::Untrained => return Ok(fallback_outcome(row)),
            YieldModel::Trained(trained) => trained,
        };

        let features = match trained.pipeline.transform_row(row) {
            Ok(features) => features,
            Err(MlError::UnknownLabel { .. }) => return Ok(fallback_outcome(row)),
            Err(err) => return Err(err),
        };

        let estimate = trained.ensemble.predict_row(&features);
        Ok(PredictionOutcome {
            predicted_yield: estimate,
            confidence: estimate_confidence(&[estimate]),
            model_used: ModelUsed::AdvancedEnsemble,
        })
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, YieldModel::Trained(_))
    }

    /// Fit diagnostics of the current model, if trained
    pub fn metrics(&self) -> Option<EnsembleMetrics> {
        match self {
            YieldModel::Untrained => None,
            YieldModel::Trained(trained) => Some(trained.metrics),
        }
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        match self {
            YieldModel::Untrained => None,
            YieldModel::Trained(trained) => Some(trained.trained_at),
        }
    }
}

fn fallback_outcome(row: &FeatureRow) -> PredictionOutcome {
    let (predicted_yield, confidence) = FallbackPredictor::estimate_row(row);
    PredictionOutcome {
        predicted_yield,
        confidence,
        model_used: ModelUsed::RuleBasedFallback,
    }
}

/// Shared handle to the latest model snapshot
///
/// Readers take a cheap `Arc` clone and keep using it for the whole request;
/// a retrain builds a complete replacement and swaps it in one write. An
/// in-flight prediction therefore never observes a partially trained model.
#[derive(Clone, Default)]
pub struct ModelHandle {
    inner: Arc<RwLock<Arc<YieldModel>>>,
}

impl ModelHandle {
    pub fn new(model: YieldModel) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(model))),
        }
    }

    /// Current snapshot; stable for as long as the caller holds it
    pub fn snapshot(&self) -> Arc<YieldModel> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock still holds a complete snapshot
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the snapshot atomically
    pub fn replace(&self, model: YieldModel) {
        let next = Arc::new(model);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
