//! HTTP handlers for yield prediction endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::services::analytics::YieldStats;
use crate::services::prediction::PredictionResponse;
use crate::services::{AnalyticsService, PredictionService};
use crate::AppState;
use crate::models::{PredictionInput, PredictionRecord};
use shared::types::Pagination;

/// Serve a yield prediction and append it to the history log
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<PredictionResponse>> {
    let service = PredictionService::new(state.db);
    let prediction = service
        .create_prediction(state.model.snapshot(), input)
        .await?;
    Ok(Json(prediction))
}

/// List recent predictions, newest first
pub async fn list_predictions(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<PredictionRecord>>> {
    let service = AnalyticsService::new(state.db);
    let predictions = service.recent_predictions(pagination).await?;
    Ok(Json(predictions))
}

/// Aggregate yield statistics over the prediction log
pub async fn get_yield_stats(State(state): State<AppState>) -> AppResult<Json<YieldStats>> {
    let service = AnalyticsService::new(state.db);
    let stats = service.yield_stats().await?;
    Ok(Json(stats))
}
