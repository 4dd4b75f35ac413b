//! Tests for the rule-based fallback predictor
//!
//! The fallback is a pure function: a per-crop base yield adjusted by
//! soil-pH and rainfall bands, always returned with confidence 0.7.

use shared::ml::fallback::{FallbackPredictor, FALLBACK_CONFIDENCE};
use shared::models::FeatureRow;

// =============================================================================
// Base Yield Table Tests
// =============================================================================

mod base_yields {
    use super::*;

    #[test]
    fn known_crops_use_table_values() {
        assert_eq!(FallbackPredictor::base_yield("Wheat"), 3.0);
        assert_eq!(FallbackPredictor::base_yield("Rice"), 4.0);
        assert_eq!(FallbackPredictor::base_yield("Corn"), 3.5);
        assert_eq!(FallbackPredictor::base_yield("Soybean"), 2.5);
        assert_eq!(FallbackPredictor::base_yield("Cotton"), 1.5);
        assert_eq!(FallbackPredictor::base_yield("Sugarcane"), 70.0);
    }

    #[test]
    fn unknown_crop_uses_generic_base() {
        assert_eq!(FallbackPredictor::base_yield("Dragonfruit"), 3.0);
    }

    #[test]
    fn crop_lookup_ignores_case() {
        assert_eq!(FallbackPredictor::base_yield("wheat"), 3.0);
        assert_eq!(FallbackPredictor::base_yield("SUGARCANE"), 70.0);
    }
}

// =============================================================================
// Adjustment Band Tests
// =============================================================================

mod adjustments {
    use super::*;

    #[test]
    fn ideal_conditions_return_base_yield() {
        assert_eq!(FallbackPredictor::estimate("Wheat", 6.5, 500.0), 3.0);
    }

    #[test]
    fn ph_band_edges_are_inclusive() {
        // 5.5 and 7.5 are inside the acceptable range
        assert_eq!(FallbackPredictor::estimate("Wheat", 5.5, 500.0), 3.0);
        assert_eq!(FallbackPredictor::estimate("Wheat", 7.5, 500.0), 3.0);
    }

    #[test]
    fn ph_outside_band_applies_penalty() {
        assert!((FallbackPredictor::estimate("Wheat", 5.4, 500.0) - 3.0 * 0.8).abs() < 1e-12);
        assert!((FallbackPredictor::estimate("Wheat", 7.6, 500.0) - 3.0 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn rainfall_band_edges_apply_no_adjustment() {
        // 300 and 1000 are boundary-exclusive: no multiplier at either edge
        assert_eq!(FallbackPredictor::estimate("Wheat", 6.5, 300.0), 3.0);
        assert_eq!(FallbackPredictor::estimate("Wheat", 6.5, 1000.0), 3.0);
    }

    #[test]
    fn low_rainfall_applies_drought_penalty() {
        assert!((FallbackPredictor::estimate("Wheat", 6.5, 299.0) - 3.0 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn high_rainfall_applies_waterlogging_penalty() {
        assert!((FallbackPredictor::estimate("Wheat", 6.5, 1001.0) - 3.0 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn adjustments_compound() {
        // Acidic soil and drought both apply
        let expected = 4.0 * 0.8 * 0.7;
        assert!((FallbackPredictor::estimate("Rice", 4.9, 150.0) - expected).abs() < 1e-12);
    }
}

// =============================================================================
// Determinism and Row Handling Tests
// =============================================================================

mod determinism {
    use super::*;

    #[test]
    fn identical_input_yields_identical_output() {
        let first = FallbackPredictor::estimate("Soybean", 6.1, 820.0);
        let second = FallbackPredictor::estimate("Soybean", 6.1, 820.0);
        assert_eq!(first, second);
    }

    #[test]
    fn row_estimate_includes_fixed_confidence() {
        let mut row = FeatureRow::new();
        row.set_label("crop_type", "Wheat");
        row.set_numeric("soil_ph", 6.5);
        row.set_numeric("rainfall", 500.0);

        let (estimate, confidence) = FallbackPredictor::estimate_row(&row);
        assert_eq!(estimate, 3.0);
        assert_eq!(confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn missing_row_fields_fall_back_to_defaults() {
        // Defaults: Wheat, pH 6.5, rainfall 500 -> unadjusted base yield
        let (estimate, confidence) = FallbackPredictor::estimate_row(&FeatureRow::new());
        assert_eq!(estimate, 3.0);
        assert_eq!(confidence, 0.7);
    }
}
