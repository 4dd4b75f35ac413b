//! Feature preprocessing pipeline
//!
//! Fits label encoders for categorical columns and standardization parameters
//! for numeric columns at training time, then applies the frozen state to
//! inference rows. Encoder codes are stable after the fit; an unseen label at
//! inference is replaced with the first fitted class before encoding, never
//! refit. Numeric columns without fitted statistics pass through unscaled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MlError;
use crate::models::{FeatureRow, FeatureValue};

/// Column-major training frame
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    columns: Vec<FeatureColumn>,
}

/// One training column: either continuous values or categorical labels
#[derive(Debug, Clone)]
pub enum FeatureColumn {
    Numeric { name: String, values: Vec<f64> },
    Categorical { name: String, labels: Vec<String> },
}

impl FeatureColumn {
    pub fn name(&self) -> &str {
        match self {
            FeatureColumn::Numeric { name, .. } => name,
            FeatureColumn::Categorical { name, .. } => name,
        }
    }

    fn len(&self) -> usize {
        match self {
            FeatureColumn::Numeric { values, .. } => values.len(),
            FeatureColumn::Categorical { labels, .. } => labels.len(),
        }
    }
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a continuous column. All columns must have the same row count.
    pub fn push_numeric(&mut self, name: &str, values: Vec<f64>) -> Result<(), MlError> {
        self.check_len(name, values.len())?;
        self.columns.push(FeatureColumn::Numeric {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    /// Add a categorical column. All columns must have the same row count.
    pub fn push_categorical(&mut self, name: &str, labels: Vec<String>) -> Result<(), MlError> {
        self.check_len(name, labels.len())?;
        self.columns.push(FeatureColumn::Categorical {
            name: name.to_string(),
            labels,
        });
        Ok(())
    }

    fn check_len(&self, name: &str, len: usize) -> Result<(), MlError> {
        match self.columns.first() {
            Some(first) if first.len() != len => Err(MlError::InvalidTrainingData(format!(
                "column '{}' has {} rows, expected {}",
                name,
                len,
                first.len()
            ))),
            _ => Ok(()),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, FeatureColumn::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }
}

/// Label-to-code mapping for one categorical feature, frozen after fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit from observed labels. Classes are the sorted unique labels, so
    /// codes are stable regardless of row order.
    pub fn fit(labels: &[String]) -> Self {
        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code for a known label
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Substitution target for unseen labels: the first fitted class
    pub fn fallback_class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }

    /// Encode a label, substituting the fallback class when it is unseen
    pub fn encode_or_substitute(&self, feature: &str, label: &str) -> Result<usize, MlError> {
        if let Some(code) = self.encode(label) {
            return Ok(code);
        }
        self.fallback_class()
            .and_then(|fallback| self.encode(fallback))
            .ok_or_else(|| MlError::UnknownLabel {
                feature: feature.to_string(),
                label: label.to_string(),
            })
    }
}

/// Standardization parameters for one numeric feature, frozen after fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    mean: f64,
    std_dev: f64,
}

impl FeatureScaler {
    /// Fit mean and population standard deviation from training values
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len().max(1) as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        Self {
            mean,
            // Constant columns standardize to zero instead of dividing by zero
            std_dev: if std_dev > f64::EPSILON { std_dev } else { 1.0 },
        }
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// Fitted preprocessing state: encoder and scaler per column plus the column
/// order the downstream models were trained with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturePipeline {
    feature_order: Vec<String>,
    encoders: BTreeMap<String, LabelEncoder>,
    scalers: BTreeMap<String, FeatureScaler>,
}

impl FeaturePipeline {
    /// Fit the pipeline from a training frame and return the preprocessed
    /// row-major matrix. This is the only place encoder or scaler state is
    /// ever mutated.
    pub fn fit_transform(frame: &FeatureFrame) -> Result<(Self, Vec<Vec<f64>>), MlError> {
        if frame.n_rows() == 0 || frame.n_columns() == 0 {
            return Err(MlError::InvalidTrainingData(
                "training frame has no rows or no feature columns".to_string(),
            ));
        }

        let mut pipeline = FeaturePipeline::default();
        let mut matrix = vec![vec![0.0; frame.n_columns()]; frame.n_rows()];

        for (col_idx, column) in frame.columns().iter().enumerate() {
            pipeline.feature_order.push(column.name().to_string());
            match column {
                FeatureColumn::Categorical { name, labels } => {
                    let encoder = LabelEncoder::fit(labels);
                    for (row_idx, label) in labels.iter().enumerate() {
                        let code = encoder.encode(label).ok_or_else(|| MlError::UnknownLabel {
                            feature: name.clone(),
                            label: label.clone(),
                        })?;
                        matrix[row_idx][col_idx] = code as f64;
                    }
                    pipeline.encoders.insert(name.clone(), encoder);
                }
                FeatureColumn::Numeric { name, values } => {
                    if values.iter().any(|v| !v.is_finite()) {
                        return Err(MlError::InvalidTrainingData(format!(
                            "column '{}' contains non-finite values",
                            name
                        )));
                    }
                    let scaler = FeatureScaler::fit(values);
                    for (row_idx, value) in values.iter().enumerate() {
                        matrix[row_idx][col_idx] = scaler.transform(*value);
                    }
                    pipeline.scalers.insert(name.clone(), scaler);
                }
            }
        }

        Ok((pipeline, matrix))
    }

    /// Apply the frozen state to a single inference row
    ///
    /// Every feature recorded at fit time must be present; unseen categorical
    /// labels are substituted with the first fitted class before encoding.
    pub fn transform_row(&self, row: &FeatureRow) -> Result<Vec<f64>, MlError> {
        let mut features = Vec::with_capacity(self.feature_order.len());
        for name in &self.feature_order {
            let value = row
                .get(name)
                .ok_or_else(|| MlError::MissingFeature(name.clone()))?;

            if let Some(encoder) = self.encoders.get(name) {
                let label = match value {
                    FeatureValue::Label(label) => label,
                    FeatureValue::Numeric(_) => {
                        return Err(MlError::InvalidFeatureValue {
                            feature: name.clone(),
                            expected: "categorical",
                        })
                    }
                };
                features.push(encoder.encode_or_substitute(name, label)? as f64);
            } else {
                let numeric = match value {
                    FeatureValue::Numeric(v) => *v,
                    FeatureValue::Label(_) => {
                        return Err(MlError::InvalidFeatureValue {
                            feature: name.clone(),
                            expected: "numeric",
                        })
                    }
                };
                // Scaling is skipped for columns without fitted statistics
                match self.scalers.get(name) {
                    Some(scaler) => features.push(scaler.transform(numeric)),
                    None => features.push(numeric),
                }
            }
        }
        Ok(features)
    }

    /// Feature names the fitted models expect, in matrix column order
    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    /// Fitted encoder for a categorical feature
    pub fn encoder(&self, feature: &str) -> Option<&LabelEncoder> {
        self.encoders.get(feature)
    }
}
