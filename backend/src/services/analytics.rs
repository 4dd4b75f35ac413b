//! Prediction history and yield analytics service

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{ModelUsed, PredictionRecord};
use shared::types::Pagination;

/// Analytics service over the prediction log
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

/// Database row for a logged prediction
#[derive(Debug, sqlx::FromRow)]
struct PredictionRow {
    id: Uuid,
    crop: String,
    rainfall: f64,
    temperature: f64,
    humidity: f64,
    soil_ph: f64,
    fertilizer_kg_per_ha: f64,
    soil_type: Option<String>,
    irrigation: Option<String>,
    sunlight_hours: Option<f64>,
    pesticide_usage: Option<f64>,
    farm_size: Option<f64>,
    elevation: Option<f64>,
    predicted_yield: f64,
    model_used: String,
    confidence: f64,
    created_at: DateTime<Utc>,
}

impl From<PredictionRow> for PredictionRecord {
    fn from(row: PredictionRow) -> Self {
        PredictionRecord {
            id: row.id,
            crop: row.crop,
            rainfall: row.rainfall,
            temperature: row.temperature,
            humidity: row.humidity,
            soil_ph: row.soil_ph,
            fertilizer_kg_per_ha: row.fertilizer_kg_per_ha,
            soil_type: row.soil_type,
            irrigation: row.irrigation,
            sunlight_hours: row.sunlight_hours,
            pesticide_usage: row.pesticide_usage,
            farm_size: row.farm_size,
            elevation: row.elevation,
            predicted_yield: row.predicted_yield,
            model_used: ModelUsed::from_str(&row.model_used),
            confidence: row.confidence,
            created_at: row.created_at,
        }
    }
}

/// Aggregate statistics over all logged predictions
#[derive(Debug, Serialize)]
pub struct YieldStats {
    pub total_predictions: i64,
    pub average_yield: Option<f64>,
    pub min_yield: Option<f64>,
    pub max_yield: Option<f64>,
    pub average_confidence: Option<f64>,
    pub by_crop: Vec<CropYieldSummary>,
}

/// Per-crop prediction summary
#[derive(Debug, Serialize)]
pub struct CropYieldSummary {
    pub crop: String,
    pub predictions: i64,
    pub average_yield: Option<f64>,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Most recent predictions, newest first
    pub async fn recent_predictions(
        &self,
        pagination: Pagination,
    ) -> AppResult<Vec<PredictionRecord>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, crop, rainfall, temperature, humidity, soil_ph,
                   fertilizer_kg_per_ha, soil_type, irrigation, sunlight_hours,
                   pesticide_usage, farm_size, elevation,
                   predicted_yield, model_used, confidence, created_at
            FROM predictions
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Aggregate yield statistics for the dashboard
    pub async fn yield_stats(&self) -> AppResult<YieldStats> {
        let totals = sqlx::query_as::<_, (i64, Option<f64>, Option<f64>, Option<f64>, Option<f64>)>(
            r#"
            SELECT COUNT(*),
                   AVG(predicted_yield),
                   MIN(predicted_yield),
                   MAX(predicted_yield),
                   AVG(confidence)
            FROM predictions
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let by_crop = sqlx::query_as::<_, (String, i64, Option<f64>)>(
            r#"
            SELECT crop, COUNT(*), AVG(predicted_yield)
            FROM predictions
            GROUP BY crop
            ORDER BY COUNT(*) DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(YieldStats {
            total_predictions: totals.0,
            average_yield: totals.1,
            min_yield: totals.2,
            max_yield: totals.3,
            average_confidence: totals.4,
            by_crop: by_crop
                .into_iter()
                .map(|(crop, predictions, average_yield)| CropYieldSummary {
                    crop,
                    predictions,
                    average_yield,
                })
                .collect(),
        })
    }
}
