//! Gradient-boosted regression trees
//!
//! Squared-error boosting: start from the target mean, then repeatedly fit a
//! shallow tree to the residuals and add its prediction scaled by the
//! learning rate. A non-zero `leaf_lambda` gives the L2-regularized variant,
//! which shrinks leaf values toward zero the way extreme gradient boosting
//! implementations do.

use serde::{Deserialize, Serialize};

use super::tree::DecisionTreeRegressor;
use super::MlError;

/// Gradient boosting regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: usize,
    leaf_lambda: f64,
    init_prediction: f64,
    trees: Vec<DecisionTreeRegressor>,
}

impl GradientBoostingRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            n_estimators: n_estimators.max(1),
            learning_rate: 0.1,
            max_depth: 3,
            leaf_lambda: 0.0,
            init_prediction: 0.0,
            trees: Vec::new(),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// L2 regularization on leaf values (0 disables it)
    pub fn with_leaf_lambda(mut self, leaf_lambda: f64) -> Self {
        self.leaf_lambda = leaf_lambda.max(0.0);
        self
    }

    /// Fit the boosted ensemble
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), MlError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(MlError::InvalidTrainingData(
                "boosting requires non-empty, length-matched features and targets".to_string(),
            ));
        }

        self.trees.clear();
        self.init_prediction = y.iter().sum::<f64>() / y.len() as f64;

        let mut current: Vec<f64> = vec![self.init_prediction; y.len()];
        for _ in 0..self.n_estimators {
            // Negative gradient of squared error is just the residual
            let residuals: Vec<f64> = y
                .iter()
                .zip(current.iter())
                .map(|(target, pred)| target - pred)
                .collect();

            let mut tree = DecisionTreeRegressor::new()
                .with_max_depth(self.max_depth)
                .with_leaf_lambda(self.leaf_lambda);
            tree.fit(x, &residuals)?;

            for (pred, row) in current.iter_mut().zip(x.iter()) {
                *pred += self.learning_rate * tree.predict_row(row);
            }
            self.trees.push(tree);
        }
        Ok(())
    }

    /// Predict a single preprocessed row
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let boosted: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        self.init_prediction + self.learning_rate * boosted
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }
}
