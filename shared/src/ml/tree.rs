//! Regression tree with variance-reduction splits
//!
//! The shared weak learner behind the forest and both boosted models. Nodes
//! are stored in a flat arena so a fitted tree serializes cleanly with the
//! rest of the model artifact.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::MlError;

/// Minimum variance reduction for a split to be kept
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Internal {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Decision tree regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    max_depth: usize,
    min_samples_split: usize,
    /// L2 shrinkage applied to leaf values; 0 gives the plain mean
    leaf_lambda: f64,
    nodes: Vec<Node>,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeRegressor {
    pub fn new() -> Self {
        Self {
            max_depth: 8,
            min_samples_split: 2,
            leaf_lambda: 0.0,
            nodes: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split.max(2);
        self
    }

    pub fn with_leaf_lambda(mut self, leaf_lambda: f64) -> Self {
        self.leaf_lambda = leaf_lambda.max(0.0);
        self
    }

    /// Fit the tree on a row-major matrix and targets
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), MlError> {
        if x.is_empty() {
            return Err(MlError::InvalidTrainingData(
                "cannot fit a tree on zero samples".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(MlError::InvalidTrainingData(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }
        self.nodes.clear();
        let indices: Vec<usize> = (0..x.len()).collect();
        self.build_node(x, y, indices, 0);
        Ok(())
    }

    fn build_node(&mut self, x: &[Vec<f64>], y: &[f64], indices: Vec<usize>, depth: usize) -> usize {
        let node_id = self.nodes.len();
        // Placeholder; replaced below once children are known
        self.nodes.push(Node::Leaf { value: 0.0 });

        let n = indices.len() as f64;
        let sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let sq_sum: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
        let leaf_value = sum / (n + self.leaf_lambda);
        let variance = (sq_sum / n) - (sum / n).powi(2);

        let is_terminal = depth >= self.max_depth
            || indices.len() < self.min_samples_split
            || variance <= MIN_GAIN;

        let split = if is_terminal {
            None
        } else {
            best_split(x, y, &indices)
        };

        match split {
            Some((feature, threshold)) => {
                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .into_iter()
                    .partition(|&i| x[i][feature] <= threshold);
                if left_idx.is_empty() || right_idx.is_empty() {
                    self.nodes[node_id] = Node::Leaf { value: leaf_value };
                    return node_id;
                }
                let left = self.build_node(x, y, left_idx, depth + 1);
                let right = self.build_node(x, y, right_idx, depth + 1);
                self.nodes[node_id] = Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                };
            }
            None => {
                self.nodes[node_id] = Node::Leaf { value: leaf_value };
            }
        }
        node_id
    }

    /// Predict a single preprocessed row
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }
}

/// Best (feature, threshold) by sum-of-squared-error reduction, if any
fn best_split(x: &[Vec<f64>], y: &[f64], indices: &[usize]) -> Option<(usize, f64)> {
    let n_features = x.first().map_or(0, Vec::len);
    let n = indices.len() as f64;
    let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n;

    let mut best: Option<(usize, f64)> = None;
    let mut best_gain = MIN_GAIN;

    for feature in 0..n_features {
        let mut pairs: Vec<(f64, f64)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for split_at in 1..pairs.len() {
            let (value, target) = pairs[split_at - 1];
            left_sum += target;
            left_sq += target * target;

            // Only split between distinct feature values
            if pairs[split_at].0 <= value {
                continue;
            }

            let left_n = split_at as f64;
            let right_n = n - left_n;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);
            let gain = parent_sse - sse;
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, (value + pairs[split_at].0) / 2.0));
            }
        }
    }
    best
}
