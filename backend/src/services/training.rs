//! Model training service
//!
//! Retraining is a blocking batch job: the new model is built completely off
//! the async runtime, persisted, and only then swapped into the shared
//! handle. Requests served during a retrain keep using the previous
//! snapshot.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::ml::{dataset, save_artifact, EnsembleMetrics, ModelHandle, YieldModel};

/// Training service managing the shared model snapshot
#[derive(Clone)]
pub struct TrainingService {
    config: Arc<Config>,
    model: ModelHandle,
}

/// Report for a completed training run
#[derive(Debug, Serialize)]
pub struct TrainingReport {
    pub rows_trained: usize,
    /// Training-set mean absolute error (a fit diagnostic, not a
    /// generalization estimate)
    pub mean_absolute_error: f64,
    /// Training-set R²
    pub r_squared: f64,
    pub trained_at: DateTime<Utc>,
    /// Whether the artifact reached durable storage
    pub artifact_saved: bool,
}

/// Current model status
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub trained: bool,
    pub metrics: Option<EnsembleMetrics>,
    pub trained_at: Option<DateTime<Utc>>,
}

impl TrainingService {
    /// Create a new TrainingService instance
    pub fn new(config: Arc<Config>, model: ModelHandle) -> Self {
        Self { config, model }
    }

    /// Retrain the model from a CSV dataset and swap in the result
    ///
    /// `data_path` overrides the configured training dataset. The swap
    /// happens only after a complete, successful fit; an artifact save
    /// failure is reported in the result but does not discard the new model.
    pub async fn retrain(&self, data_path: Option<String>) -> AppResult<TrainingReport> {
        let data_path = data_path.unwrap_or_else(|| self.config.model.training_data_path.clone());
        let artifact_path = self.config.model.artifact_path.clone();

        tracing::info!(data_path, "Starting model training");

        let (trained, rows_trained, artifact_saved) =
            tokio::task::spawn_blocking(move || -> AppResult<_> {
                let data = dataset::load_csv(Path::new(&data_path))?;
                let rows = data.n_rows();
                let trained = YieldModel::train(&data)?;

                let saved = match save_artifact(&trained, Path::new(&artifact_path)) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(
                            path = artifact_path,
                            error = %err,
                            "Failed to persist model artifact; the new model is only in memory"
                        );
                        false
                    }
                };
                Ok((trained, rows, saved))
            })
            .await
            .map_err(|err| AppError::Internal(format!("training task failed: {}", err)))??;

        let report = TrainingReport {
            rows_trained,
            mean_absolute_error: trained.metrics.mean_absolute_error,
            r_squared: trained.metrics.r_squared,
            trained_at: trained.trained_at,
            artifact_saved,
        };

        tracing::info!(
            rows = report.rows_trained,
            mae = report.mean_absolute_error,
            r_squared = report.r_squared,
            "Training completed"
        );

        self.model.replace(YieldModel::Trained(trained));
        Ok(report)
    }

    /// Status of the current model snapshot
    pub fn status(&self) -> ModelStatus {
        let snapshot = self.model.snapshot();
        ModelStatus {
            trained: snapshot.is_trained(),
            metrics: snapshot.metrics(),
            trained_at: snapshot.trained_at(),
        }
    }
}
