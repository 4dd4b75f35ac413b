//! Tests for the feature preprocessing pipeline
//!
//! Covers encoder code stability, unseen-label substitution, numeric
//! standardization, and the schema errors raised when an inference row
//! does not match the fitted pipeline.

use shared::ml::pipeline::{FeatureFrame, FeaturePipeline, LabelEncoder};
use shared::ml::MlError;
use shared::models::FeatureRow;

fn training_frame() -> FeatureFrame {
    let mut frame = FeatureFrame::new();
    frame
        .push_categorical(
            "crop_type",
            vec!["Wheat".into(), "Rice".into(), "Corn".into(), "Rice".into()],
        )
        .unwrap();
    frame
        .push_numeric("rainfall", vec![400.0, 800.0, 600.0, 800.0])
        .unwrap();
    frame
}

// =============================================================================
// Label Encoder Tests
// =============================================================================

mod label_encoding {
    use super::*;

    #[test]
    fn classes_are_sorted_and_deduplicated() {
        let encoder = LabelEncoder::fit(&["Rice".into(), "Wheat".into(), "Rice".into()]);
        assert_eq!(encoder.classes(), &["Rice".to_string(), "Wheat".to_string()]);
    }

    #[test]
    fn codes_are_independent_of_row_order() {
        let shuffled = LabelEncoder::fit(&["Wheat".into(), "Corn".into(), "Rice".into()]);
        let ordered = LabelEncoder::fit(&["Corn".into(), "Rice".into(), "Wheat".into()]);
        assert_eq!(shuffled.encode("Rice"), ordered.encode("Rice"));
        assert_eq!(shuffled.encode("Corn"), Some(0));
        assert_eq!(shuffled.encode("Wheat"), Some(2));
    }

    #[test]
    fn unseen_label_encodes_as_first_class() {
        let encoder = LabelEncoder::fit(&["Corn".into(), "Rice".into(), "Wheat".into()]);
        let substituted = encoder.encode_or_substitute("crop_type", "Quinoa").unwrap();
        let first = encoder.encode_or_substitute("crop_type", "Corn").unwrap();
        assert_eq!(substituted, first);
        assert_eq!(encoder.fallback_class(), Some("Corn"));
    }
}

// =============================================================================
// Fit and Transform Tests
// =============================================================================

mod fit_transform {
    use super::*;

    #[test]
    fn numeric_columns_are_standardized() {
        let mut frame = FeatureFrame::new();
        frame.push_numeric("rainfall", vec![1.0, 2.0, 3.0]).unwrap();
        let (_, matrix) = FeaturePipeline::fit_transform(&frame).unwrap();

        // mean 2, population std sqrt(2/3)
        let std_dev = (2.0f64 / 3.0).sqrt();
        assert!((matrix[0][0] - (1.0 - 2.0) / std_dev).abs() < 1e-12);
        assert!((matrix[1][0]).abs() < 1e-12);
        assert!((matrix[2][0] - (3.0 - 2.0) / std_dev).abs() < 1e-12);
    }

    #[test]
    fn constant_column_standardizes_to_zero() {
        let mut frame = FeatureFrame::new();
        frame.push_numeric("elevation", vec![120.0, 120.0]).unwrap();
        let (_, matrix) = FeaturePipeline::fit_transform(&frame).unwrap();
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[1][0], 0.0);
    }

    #[test]
    fn categorical_columns_encode_to_stable_codes() {
        let (pipeline, matrix) = FeaturePipeline::fit_transform(&training_frame()).unwrap();

        // Sorted classes: Corn 0, Rice 1, Wheat 2
        assert_eq!(matrix[0][0], 2.0);
        assert_eq!(matrix[1][0], 1.0);
        assert_eq!(matrix[2][0], 0.0);
        assert_eq!(matrix[3][0], 1.0);
        assert_eq!(pipeline.feature_order(), &["crop_type", "rainfall"]);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let result = FeaturePipeline::fit_transform(&FeatureFrame::new());
        assert!(matches!(result, Err(MlError::InvalidTrainingData(_))));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut frame = FeatureFrame::new();
        frame
            .push_numeric("rainfall", vec![400.0, f64::NAN])
            .unwrap();
        let result = FeaturePipeline::fit_transform(&frame);
        assert!(matches!(result, Err(MlError::InvalidTrainingData(_))));
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let mut frame = FeatureFrame::new();
        frame.push_numeric("rainfall", vec![400.0, 800.0]).unwrap();
        let result = frame.push_numeric("humidity", vec![60.0]);
        assert!(matches!(result, Err(MlError::InvalidTrainingData(_))));
    }
}

// =============================================================================
// Inference Row Tests
// =============================================================================

mod transform_row {
    use super::*;

    #[test]
    fn fitted_state_is_applied_to_inference_rows() {
        let (pipeline, matrix) = FeaturePipeline::fit_transform(&training_frame()).unwrap();

        let mut row = FeatureRow::new();
        row.set_label("crop_type", "Rice");
        row.set_numeric("rainfall", 800.0);

        let features = pipeline.transform_row(&row).unwrap();
        // Matches the second training row exactly
        assert_eq!(features, matrix[1]);
    }

    #[test]
    fn unseen_label_matches_substituted_class() {
        let (pipeline, _) = FeaturePipeline::fit_transform(&training_frame()).unwrap();

        let mut unseen = FeatureRow::new();
        unseen.set_label("crop_type", "Quinoa");
        unseen.set_numeric("rainfall", 500.0);

        let mut substituted = FeatureRow::new();
        substituted.set_label("crop_type", "Corn");
        substituted.set_numeric("rainfall", 500.0);

        assert_eq!(
            pipeline.transform_row(&unseen).unwrap(),
            pipeline.transform_row(&substituted).unwrap()
        );
    }

    #[test]
    fn missing_feature_is_an_error() {
        let (pipeline, _) = FeaturePipeline::fit_transform(&training_frame()).unwrap();

        let mut row = FeatureRow::new();
        row.set_label("crop_type", "Rice");

        match pipeline.transform_row(&row) {
            Err(MlError::MissingFeature(name)) => assert_eq!(name, "rainfall"),
            other => panic!("expected MissingFeature, got {:?}", other),
        }
    }

    #[test]
    fn wrong_value_kind_is_an_error() {
        let (pipeline, _) = FeaturePipeline::fit_transform(&training_frame()).unwrap();

        let mut row = FeatureRow::new();
        row.set_numeric("crop_type", 1.0);
        row.set_numeric("rainfall", 500.0);

        assert!(matches!(
            pipeline.transform_row(&row),
            Err(MlError::InvalidFeatureValue { .. })
        ));
    }
}
