//! Three-model yield ensemble
//!
//! A bootstrap random forest, a gradient-boosted tree model, and an
//! L2-regularized boosted variant, all fit on the same preprocessed matrix
//! and combined by unweighted averaging.

use serde::{Deserialize, Serialize};

use super::boosting::GradientBoostingRegressor;
use super::forest::RandomForestRegressor;
use super::MlError;

/// Estimators per member model
const N_ESTIMATORS: usize = 100;

/// Seed shared by every stochastic component for reproducible training
pub const RANDOM_STATE: u64 = 42;

/// Training-fit diagnostics, computed on the training set itself.
/// These measure fit quality, not generalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnsembleMetrics {
    pub mean_absolute_error: f64,
    pub r_squared: f64,
}

/// The fitted three-model ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldEnsemble {
    forest: RandomForestRegressor,
    boosting: GradientBoostingRegressor,
    regularized_boosting: GradientBoostingRegressor,
}

impl YieldEnsemble {
    /// Fit all three members and return training-set diagnostics
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<(Self, EnsembleMetrics), MlError> {
        if x.is_empty() || y.is_empty() {
            return Err(MlError::InvalidTrainingData(
                "training data is empty".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(MlError::InvalidTrainingData(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }

        let mut forest = RandomForestRegressor::new(N_ESTIMATORS).with_random_state(RANDOM_STATE);
        forest.fit(x, y)?;

        let mut boosting = GradientBoostingRegressor::new(N_ESTIMATORS);
        boosting.fit(x, y)?;

        let mut regularized_boosting =
            GradientBoostingRegressor::new(N_ESTIMATORS).with_leaf_lambda(1.0);
        regularized_boosting.fit(x, y)?;

        let ensemble = Self {
            forest,
            boosting,
            regularized_boosting,
        };

        let predictions: Vec<f64> = x.iter().map(|row| ensemble.predict_row(row)).collect();
        let metrics = EnsembleMetrics {
            mean_absolute_error: mean_absolute_error(y, &predictions),
            r_squared: r_squared(y, &predictions),
        };

        Ok((ensemble, metrics))
    }

    /// Unweighted average of the three member predictions
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let sum = self.forest.predict_row(row)
            + self.boosting.predict_row(row)
            + self.regularized_boosting.predict_row(row);
        sum / 3.0
    }
}

/// Mean absolute error between targets and predictions
pub fn mean_absolute_error(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    targets
        .iter()
        .zip(predictions.iter())
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / targets.len() as f64
}

/// Coefficient of determination; 0.0 when the targets are constant
pub fn r_squared(targets: &[f64], predictions: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let ss_tot: f64 = targets.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot <= f64::EPSILON {
        return 0.0;
    }
    let ss_res: f64 = targets
        .iter()
        .zip(predictions.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}
