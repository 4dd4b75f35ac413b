//! Feature schema and raw feature rows
//!
//! A feature row is a flat mapping from feature name to value. The schema the
//! platform understands is fixed here: three categorical features and nine
//! continuous ones. Which of them a fitted model actually requires is decided
//! at training time from the columns present in the training data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Categorical feature columns (label encoded)
pub const CATEGORICAL_FEATURES: [&str; 3] = ["crop_type", "soil_type", "irrigation"];

/// Continuous feature columns (standardized)
pub const NUMERIC_FEATURES: [&str; 9] = [
    "rainfall",
    "temperature",
    "humidity",
    "soil_ph",
    "fertilizer_kg_per_ha",
    "sunlight_hours",
    "pesticide_usage",
    "farm_size",
    "elevation",
];

/// Crop types offered by the platform
pub const CROP_TYPES: [&str; 6] = ["Wheat", "Rice", "Corn", "Soybean", "Cotton", "Sugarcane"];

/// Soil types offered by the platform
pub const SOIL_TYPES: [&str; 6] = ["Loamy", "Sandy", "Clay", "Silty", "Peaty", "Chalky"];

/// Irrigation methods offered by the platform
pub const IRRIGATION_TYPES: [&str; 4] = ["Drip", "Sprinkler", "Flood", "None"];

/// A single feature value, either continuous or categorical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Label(String),
}

/// A raw input row: feature name mapped to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow(BTreeMap<String, FeatureValue>);

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_numeric(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), FeatureValue::Numeric(value));
    }

    pub fn set_label(&mut self, name: &str, label: impl Into<String>) {
        self.0.insert(name.to_string(), FeatureValue::Label(label.into()));
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.0.get(name)
    }

    /// Continuous value for a feature, if present and numeric
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(FeatureValue::Numeric(v)) => Some(*v),
            _ => None,
        }
    }

    /// Categorical label for a feature, if present and categorical
    pub fn label(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FeatureValue::Label(l)) => Some(l.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
