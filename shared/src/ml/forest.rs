//! Bootstrap-aggregated forest of regression trees

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::DecisionTreeRegressor;
use super::MlError;

/// Random forest regressor
///
/// Each tree is fit on a bootstrap resample drawn from a seeded generator, so
/// a fixed `random_state` makes training fully reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    max_depth: usize,
    random_state: u64,
    trees: Vec<DecisionTreeRegressor>,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            n_estimators: n_estimators.max(1),
            max_depth: 12,
            random_state: 0,
            trees: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Fit all trees on bootstrap resamples of the training data
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), MlError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(MlError::InvalidTrainingData(
                "forest requires non-empty, length-matched features and targets".to_string(),
            ));
        }

        self.trees.clear();
        let n_samples = x.len();
        for tree_idx in 0..self.n_estimators {
            // Per-tree seed keeps resamples independent but reproducible
            let mut rng = StdRng::seed_from_u64(self.random_state.wrapping_add(tree_idx as u64));
            let mut sample_x = Vec::with_capacity(n_samples);
            let mut sample_y = Vec::with_capacity(n_samples);
            for _ in 0..n_samples {
                let i = rng.gen_range(0..n_samples);
                sample_x.push(x[i].clone());
                sample_y.push(y[i]);
            }

            let mut tree = DecisionTreeRegressor::new()
                .with_max_depth(self.max_depth)
                .with_min_samples_split(4);
            tree.fit(&sample_x, &sample_y)?;
            self.trees.push(tree);
        }
        Ok(())
    }

    /// Average prediction across all trees
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }
}
