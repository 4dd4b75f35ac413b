//! Validation utilities for the Crop Yield Platform
//!
//! Sanity checks applied at the API boundary. Dropdown enumeration and form
//! ranges remain the caller's responsibility; these guard against values that
//! are physically impossible rather than merely unusual.

use rust_decimal::Decimal;

use crate::models::PredictionInput;

// ============================================================================
// Prediction Input Validations
// ============================================================================

/// Validate a prediction input before it reaches the pipeline
pub fn validate_prediction_input(input: &PredictionInput) -> Result<(), &'static str> {
    if input.crop_type.trim().is_empty() {
        return Err("Crop type is required");
    }
    validate_rainfall(input.rainfall)?;
    validate_temperature(input.temperature)?;
    validate_humidity(input.humidity)?;
    validate_soil_ph(input.soil_ph)?;
    if !input.fertilizer_kg_per_ha.is_finite() || input.fertilizer_kg_per_ha < 0.0 {
        return Err("Fertilizer usage must be non-negative");
    }
    for optional in [
        input.sunlight_hours,
        input.pesticide_usage,
        input.farm_size,
        input.elevation,
    ]
    .into_iter()
    .flatten()
    {
        if !optional.is_finite() {
            return Err("Feature values must be finite numbers");
        }
    }
    Ok(())
}

/// Validate rainfall in millimeters per season
pub fn validate_rainfall(rainfall: f64) -> Result<(), &'static str> {
    if !rainfall.is_finite() || rainfall < 0.0 {
        return Err("Rainfall must be non-negative");
    }
    Ok(())
}

/// Validate temperature in degrees Celsius
pub fn validate_temperature(temperature: f64) -> Result<(), &'static str> {
    if !temperature.is_finite() || !(-50.0..=60.0).contains(&temperature) {
        return Err("Temperature must be between -50 and 60 degrees Celsius");
    }
    Ok(())
}

/// Validate relative humidity percentage
pub fn validate_humidity(humidity: f64) -> Result<(), &'static str> {
    if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

/// Validate soil pH
pub fn validate_soil_ph(soil_ph: f64) -> Result<(), &'static str> {
    if !soil_ph.is_finite() || !(0.0..=14.0).contains(&soil_ph) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

// ============================================================================
// Economic Input Validations
// ============================================================================

/// Validate a monetary or physical quantity that must not be negative
pub fn validate_non_negative(value: Decimal, what: &'static str) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err(what);
    }
    Ok(())
}
