//! Prediction inputs and logged prediction records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::features::FeatureRow;

/// Caller-supplied input for a yield prediction
///
/// The first six fields are required by every model the platform ships;
/// the optional ones are used only when the fitted model was trained on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    pub crop_type: String,
    pub rainfall: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_ph: f64,
    pub fertilizer_kg_per_ha: f64,
    pub soil_type: Option<String>,
    pub irrigation: Option<String>,
    pub sunlight_hours: Option<f64>,
    pub pesticide_usage: Option<f64>,
    pub farm_size: Option<f64>,
    pub elevation: Option<f64>,
}

impl PredictionInput {
    /// Flatten into the raw feature row the pipeline consumes
    pub fn to_feature_row(&self) -> FeatureRow {
        let mut row = FeatureRow::new();
        row.set_label("crop_type", self.crop_type.clone());
        row.set_numeric("rainfall", self.rainfall);
        row.set_numeric("temperature", self.temperature);
        row.set_numeric("humidity", self.humidity);
        row.set_numeric("soil_ph", self.soil_ph);
        row.set_numeric("fertilizer_kg_per_ha", self.fertilizer_kg_per_ha);
        if let Some(soil_type) = &self.soil_type {
            row.set_label("soil_type", soil_type.clone());
        }
        if let Some(irrigation) = &self.irrigation {
            row.set_label("irrigation", irrigation.clone());
        }
        if let Some(sunlight_hours) = self.sunlight_hours {
            row.set_numeric("sunlight_hours", sunlight_hours);
        }
        if let Some(pesticide_usage) = self.pesticide_usage {
            row.set_numeric("pesticide_usage", pesticide_usage);
        }
        if let Some(farm_size) = self.farm_size {
            row.set_numeric("farm_size", farm_size);
        }
        if let Some(elevation) = self.elevation {
            row.set_numeric("elevation", elevation);
        }
        row
    }
}

/// Which predictor produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelUsed {
    AdvancedEnsemble,
    RuleBasedFallback,
}

impl ModelUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelUsed::AdvancedEnsemble => "advanced_ensemble",
            ModelUsed::RuleBasedFallback => "rule_based_fallback",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "rule_based_fallback" => ModelUsed::RuleBasedFallback,
            _ => ModelUsed::AdvancedEnsemble,
        }
    }
}

/// A logged prediction, as stored in the prediction history
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub crop: String,
    pub rainfall: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_ph: f64,
    pub fertilizer_kg_per_ha: f64,
    pub soil_type: Option<String>,
    pub irrigation: Option<String>,
    pub sunlight_hours: Option<f64>,
    pub pesticide_usage: Option<f64>,
    pub farm_size: Option<f64>,
    pub elevation: Option<f64>,
    pub predicted_yield: f64,
    pub model_used: ModelUsed,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}
