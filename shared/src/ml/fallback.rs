//! Rule-based fallback predictor
//!
//! Deterministic, stateless estimate used whenever no trained ensemble is
//! available: a per-crop base yield adjusted by soil-pH and rainfall bands.
//! Identical input always produces identical output.

use crate::models::FeatureRow;

/// Confidence attached to every fallback estimate
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Defaults used when the input row omits a field the rules need
const DEFAULT_CROP: &str = "Wheat";
const DEFAULT_SOIL_PH: f64 = 6.5;
const DEFAULT_RAINFALL: f64 = 500.0;

/// Rule-based yield estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPredictor;

impl FallbackPredictor {
    /// Base yield in tons/hectare for a crop; 3.0 for unknown crops
    pub fn base_yield(crop: &str) -> f64 {
        if crop.eq_ignore_ascii_case("wheat") {
            3.0
        } else if crop.eq_ignore_ascii_case("rice") {
            4.0
        } else if crop.eq_ignore_ascii_case("corn") {
            3.5
        } else if crop.eq_ignore_ascii_case("soybean") {
            2.5
        } else if crop.eq_ignore_ascii_case("cotton") {
            1.5
        } else if crop.eq_ignore_ascii_case("sugarcane") {
            70.0
        } else {
            3.0
        }
    }

    /// Estimate yield from crop, soil pH, and rainfall
    ///
    /// Adjustments are independent and compound: pH outside [5.5, 7.5]
    /// multiplies by 0.8; rainfall below 300mm by 0.7 and above 1000mm by
    /// 0.9, with both band edges applying no adjustment.
    pub fn estimate(crop: &str, soil_ph: f64, rainfall: f64) -> f64 {
        let mut adjustment = 1.0;

        if !(5.5..=7.5).contains(&soil_ph) {
            adjustment *= 0.8;
        }

        if rainfall < 300.0 {
            adjustment *= 0.7;
        } else if rainfall > 1000.0 {
            adjustment *= 0.9;
        }

        Self::base_yield(crop) * adjustment
    }

    /// Estimate from a raw feature row, filling in defaults for missing keys
    pub fn estimate_row(row: &FeatureRow) -> (f64, f64) {
        let crop = row.label("crop_type").unwrap_or(DEFAULT_CROP);
        let soil_ph = row.numeric("soil_ph").unwrap_or(DEFAULT_SOIL_PH);
        let rainfall = row.numeric("rainfall").unwrap_or(DEFAULT_RAINFALL);
        (Self::estimate(crop, soil_ph, rainfall), FALLBACK_CONFIDENCE)
    }
}
