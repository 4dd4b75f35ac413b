//! Training data loading
//!
//! Reads raw CSV exports into a feature frame plus target vector. Header
//! names are normalized to the canonical feature schema (datasets in the
//! wild use `crop`, `temp`, `rainfall_mm`, ...), the target column is
//! detected from a candidate list, and kg/ha targets are converted to
//! tons/ha.

use std::path::Path;

use super::pipeline::FeatureFrame;
use super::MlError;
use crate::models::CATEGORICAL_FEATURES;

/// Target column names, in priority order
const TARGET_CANDIDATES: [&str; 5] = [
    "yield_t_per_ha",
    "yield_tons_per_ha",
    "yield_kg_per_ha",
    "yield",
    "production",
];

/// Targets larger than this are assumed to be kg/ha rather than t/ha
const KG_SCALE_THRESHOLD: f64 = 10_000.0;

/// A training set: feature frame and one numeric target per row
#[derive(Debug, Clone, Default)]
pub struct TrainingData {
    pub frame: FeatureFrame,
    pub targets: Vec<f64>,
}

impl TrainingData {
    pub fn n_rows(&self) -> usize {
        self.targets.len()
    }
}

/// Map dataset header spellings onto the canonical feature schema
pub fn canonical_feature_name(header: &str) -> &str {
    match header.trim() {
        "crop" => "crop_type",
        "temp" | "temperature_c" => "temperature",
        "rainfall_mm" => "rainfall",
        "humidity_percent" => "humidity",
        "ph" => "soil_ph",
        "fertilizer" => "fertilizer_kg_per_ha",
        other => other,
    }
}

/// Pick the target column from the headers; falls back to the last column
pub fn detect_target_column(headers: &[String]) -> Option<usize> {
    for candidate in TARGET_CANDIDATES {
        if let Some(idx) = headers.iter().position(|h| h.trim() == candidate) {
            return Some(idx);
        }
    }
    if headers.is_empty() {
        None
    } else {
        Some(headers.len() - 1)
    }
}

/// Convert a target vector to tons/ha when the source column is in kg/ha
pub fn normalize_targets(target_name: &str, targets: Vec<f64>) -> Vec<f64> {
    let max = targets.iter().cloned().fold(f64::MIN, f64::max);
    if target_name.contains("kg") || max > KG_SCALE_THRESHOLD {
        targets.into_iter().map(|t| t / 1000.0).collect()
    } else {
        targets
    }
}

/// Load a training set from a CSV file
pub fn load_csv(path: &Path) -> Result<TrainingData, MlError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| MlError::Dataset(format!("cannot open {}: {}", path.display(), e)))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MlError::Dataset(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let target_idx = detect_target_column(&headers)
        .ok_or_else(|| MlError::Dataset("CSV file has no columns".to_string()))?;

    // Column-major string buffer, one per column
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| MlError::Dataset(e.to_string()))?;
        if record.len() != headers.len() {
            return Err(MlError::Dataset(format!(
                "row has {} fields, expected {}",
                record.len(),
                headers.len()
            )));
        }
        for (idx, field) in record.iter().enumerate() {
            raw_columns[idx].push(field.trim().to_string());
        }
    }

    if raw_columns[target_idx].is_empty() {
        return Err(MlError::InvalidTrainingData(format!(
            "{} contains no data rows",
            path.display()
        )));
    }

    let targets = raw_columns[target_idx]
        .iter()
        .map(|v| {
            v.parse::<f64>().map_err(|_| {
                MlError::Dataset(format!("non-numeric target value '{}'", v))
            })
        })
        .collect::<Result<Vec<f64>, MlError>>()?;
    let targets = normalize_targets(&headers[target_idx], targets);

    let mut frame = FeatureFrame::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == target_idx {
            continue;
        }
        let name = canonical_feature_name(header);
        let values = &raw_columns[idx];

        if CATEGORICAL_FEATURES.contains(&name) {
            frame.push_categorical(name, values.clone())?;
            continue;
        }

        // Fully numeric columns become continuous features; anything else is
        // treated as an extra categorical column
        let parsed: Result<Vec<f64>, _> = values.iter().map(|v| v.parse::<f64>()).collect();
        match parsed {
            Ok(numeric) => frame.push_numeric(name, numeric)?,
            Err(_) => frame.push_categorical(name, values.clone())?,
        }
    }

    Ok(TrainingData { frame, targets })
}
