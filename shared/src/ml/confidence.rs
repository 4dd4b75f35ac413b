//! Heuristic confidence estimation
//!
//! Dispersion across a prediction sample is used as an inverse proxy for
//! confidence. A single point estimate carries no dispersion signal, so a
//! calibrated constant is returned instead. The score is a heuristic bounded
//! to [0, 0.99], not a statistical confidence interval.

/// Confidence assigned to a single point estimate
pub const SINGLE_ESTIMATE_CONFIDENCE: f64 = 0.85;

/// Upper bound on any confidence score
pub const MAX_CONFIDENCE: f64 = 0.99;

/// Estimate confidence from a sample of predictions
///
/// More than one value: `1 - std/mean`, floored at 0. One value (the normal
/// single-row inference case) or none: the fixed default. Either way the
/// result is capped at 0.99.
pub fn estimate_confidence(sample: &[f64]) -> f64 {
    let confidence = if sample.len() > 1 {
        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        (1.0 - std_dev / mean).max(0.0)
    } else {
        SINGLE_ESTIMATE_CONFIDENCE
    };
    confidence.min(MAX_CONFIDENCE)
}
