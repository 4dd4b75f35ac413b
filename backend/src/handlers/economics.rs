//! HTTP handlers for economic analysis endpoints

use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{FertilizerPlan, RoiAnalysis, WaterEfficiencyReport};
use shared::economics;
use shared::validation::validate_non_negative;

/// Input for an ROI calculation
#[derive(Debug, Deserialize)]
pub struct RoiInput {
    /// Expected yield in tons/ha
    pub expected_yield: Decimal,
    /// Total input costs per hectare
    pub input_costs: Decimal,
    /// Market price per ton
    pub market_price: Decimal,
}

/// Calculate return on investment for a cropping season
pub async fn calculate_roi(Json(input): Json<RoiInput>) -> AppResult<Json<RoiAnalysis>> {
    validate_non_negative(input.expected_yield, "Expected yield cannot be negative")
        .and_then(|_| validate_non_negative(input.input_costs, "Input costs cannot be negative"))
        .and_then(|_| validate_non_negative(input.market_price, "Market price cannot be negative"))
        .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

    Ok(Json(economics::calculate_roi(
        input.expected_yield,
        input.input_costs,
        input.market_price,
    )))
}

/// Input for a fertilizer optimization
#[derive(Debug, Deserialize)]
pub struct FertilizerInput {
    /// Current usage in kg/ha
    pub current_fertilizer: Decimal,
    /// Price per kg
    pub fertilizer_price: Decimal,
    pub crop_type: String,
    /// Maximum fertilizer budget per hectare
    pub max_budget: Decimal,
}

/// Recommend fertilizer usage within a budget
pub async fn optimize_fertilizer(
    Json(input): Json<FertilizerInput>,
) -> AppResult<Json<FertilizerPlan>> {
    validate_non_negative(input.current_fertilizer, "Current fertilizer cannot be negative")
        .and_then(|_| {
            validate_non_negative(input.fertilizer_price, "Fertilizer price cannot be negative")
        })
        .and_then(|_| validate_non_negative(input.max_budget, "Budget cannot be negative"))
        .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

    Ok(Json(economics::optimize_fertilizer(
        input.current_fertilizer,
        input.fertilizer_price,
        &input.crop_type,
        input.max_budget,
    )))
}

/// Input for a water-efficiency report
#[derive(Debug, Deserialize)]
pub struct WaterEfficiencyInput {
    /// Water used in cubic meters
    pub water_used: Decimal,
    /// Yield obtained in tons
    pub yield_obtained: Decimal,
    pub crop_type: String,
}

/// Calculate water-use efficiency against the crop benchmark
pub async fn water_efficiency(
    Json(input): Json<WaterEfficiencyInput>,
) -> AppResult<Json<WaterEfficiencyReport>> {
    validate_non_negative(input.water_used, "Water used cannot be negative")
        .and_then(|_| {
            validate_non_negative(input.yield_obtained, "Yield obtained cannot be negative")
        })
        .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

    Ok(Json(economics::water_efficiency(
        input.water_used,
        input.yield_obtained,
        &input.crop_type,
    )))
}
