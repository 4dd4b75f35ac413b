//! Yield prediction service
//!
//! Runs a caller-supplied input row through the current model snapshot and
//! appends the result to the prediction log. A failed append is reported in
//! the response and the log, never as a request failure: the prediction has
//! already been computed at that point.

use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ModelUsed, PredictionInput};
use shared::ml::{PredictionOutcome, YieldModel};
use shared::validation::validate_prediction_input;

/// Prediction service for serving and logging yield estimates
#[derive(Clone)]
pub struct PredictionService {
    db: PgPool,
}

/// Response for a served prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_yield: f64,
    pub confidence: f64,
    pub model_used: ModelUsed,
    /// Identifier of the logged record, when the append succeeded
    pub record_id: Option<Uuid>,
    /// Whether the prediction reached the history log
    pub logged: bool,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Serve a yield prediction against the given model snapshot
    pub async fn create_prediction(
        &self,
        model: Arc<YieldModel>,
        input: PredictionInput,
    ) -> AppResult<PredictionResponse> {
        validate_prediction_input(&input)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let row = input.to_feature_row();
        let outcome = model.predict(&row)?;

        let record_id = match self.append_log(&input, &outcome).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to append prediction to history; returning the prediction anyway"
                );
                None
            }
        };

        Ok(PredictionResponse {
            predicted_yield: outcome.predicted_yield,
            confidence: outcome.confidence,
            model_used: outcome.model_used,
            record_id,
            logged: record_id.is_some(),
        })
    }

    /// Append a served prediction to the history log
    async fn append_log(
        &self,
        input: &PredictionInput,
        outcome: &PredictionOutcome,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO predictions (
                crop, rainfall, temperature, humidity, soil_ph,
                fertilizer_kg_per_ha, soil_type, irrigation, sunlight_hours,
                pesticide_usage, farm_size, elevation,
                predicted_yield, model_used, confidence
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(&input.crop_type)
        .bind(input.rainfall)
        .bind(input.temperature)
        .bind(input.humidity)
        .bind(input.soil_ph)
        .bind(input.fertilizer_kg_per_ha)
        .bind(&input.soil_type)
        .bind(&input.irrigation)
        .bind(input.sunlight_hours)
        .bind(input.pesticide_usage)
        .bind(input.farm_size)
        .bind(input.elevation)
        .bind(outcome.predicted_yield)
        .bind(outcome.model_used.as_str())
        .bind(outcome.confidence)
        .fetch_one(&self.db)
        .await
    }
}
