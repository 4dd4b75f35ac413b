//! HTTP handlers for model lifecycle endpoints

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::training::{ModelStatus, TrainingReport};
use crate::services::TrainingService;
use crate::AppState;

/// Input for a training run
#[derive(Debug, Deserialize, Default)]
pub struct TrainModelInput {
    /// CSV dataset to train from; defaults to the configured dataset
    pub data_path: Option<String>,
}

/// Retrain the yield model from a CSV dataset
///
/// Blocking batch job; the previous model keeps serving until the new one
/// is completely fitted.
pub async fn train_model(
    State(state): State<AppState>,
    Json(input): Json<TrainModelInput>,
) -> AppResult<Json<TrainingReport>> {
    let service = TrainingService::new(state.config, state.model);
    let report = service.retrain(input.data_path).await?;
    Ok(Json(report))
}

/// Status and fit diagnostics of the current model
pub async fn get_model_status(State(state): State<AppState>) -> AppResult<Json<ModelStatus>> {
    let service = TrainingService::new(state.config, state.model);
    Ok(Json(service.status()))
}
