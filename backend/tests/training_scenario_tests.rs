//! End-to-end training scenarios
//!
//! Full pipeline runs over the synthetic generator, artifact persistence
//! round trips, and snapshot semantics of the shared model handle.

use std::fs;
use std::path::PathBuf;

use shared::ml::{load_artifact, save_artifact, synthetic, ModelHandle, YieldModel};
use shared::models::FeatureRow;

fn sample_row() -> FeatureRow {
    let mut row = FeatureRow::new();
    row.set_label("crop_type", "Corn");
    row.set_numeric("rainfall", 680.0);
    row.set_numeric("temperature", 25.5);
    row.set_numeric("humidity", 64.0);
    row.set_numeric("soil_ph", 6.6);
    row.set_numeric("fertilizer_kg_per_ha", 175.0);
    row
}

fn temp_artifact_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cyp_{}_{}.json", name, std::process::id()))
}

// =============================================================================
// Synthetic Generator Tests
// =============================================================================

mod generator {
    use super::*;

    #[test]
    fn generator_is_deterministic_per_seed() {
        let a = synthetic::generate(50, 42);
        let b = synthetic::generate(50, 42);
        assert_eq!(a.targets, b.targets);

        let c = synthetic::generate(50, 43);
        assert_ne!(a.targets, c.targets);
    }

    #[test]
    fn generated_rows_are_well_formed() {
        let data = synthetic::generate(200, 42);
        assert_eq!(data.n_rows(), 200);
        assert_eq!(data.frame.n_rows(), 200);
        assert_eq!(data.frame.n_columns(), 6);
        assert!(data.targets.iter().all(|t| t.is_finite() && *t > 0.0));
    }
}

// =============================================================================
// Full Training Run Tests
// =============================================================================

mod full_training_run {
    use super::*;

    #[test]
    fn ensemble_learns_the_synthetic_yield_surface() {
        // Reference scenario: 3000 generated rows, seeded at 42
        let data = synthetic::generate(3000, 42);
        let trained = YieldModel::train(&data).unwrap();

        assert!(trained.metrics.r_squared > 0.5);
        assert!(trained.metrics.mean_absolute_error >= 0.0);

        let model = YieldModel::Trained(trained);
        let outcome = model.predict(&sample_row()).unwrap();
        assert!(outcome.predicted_yield > 0.0);
        assert!((0.0..=0.99).contains(&outcome.confidence));
    }
}

// =============================================================================
// Artifact Persistence Tests
// =============================================================================

mod artifacts {
    use super::*;

    #[test]
    fn saved_artifact_loads_into_an_equivalent_model() {
        let data = synthetic::generate(80, 42);
        let trained = YieldModel::train(&data).unwrap();
        let path = temp_artifact_path("roundtrip");

        save_artifact(&trained, &path).unwrap();
        let loaded = load_artifact(&path).unwrap().unwrap();
        let _ = fs::remove_file(&path);

        // The frozen scaler and tree parameters must survive the round trip
        // bit-exactly: a single-ulp drift in a split threshold is enough to
        // route rows down different branches
        let row = sample_row();
        assert_eq!(
            trained.pipeline.transform_row(&row).unwrap(),
            loaded.pipeline.transform_row(&row).unwrap()
        );

        let before = YieldModel::Trained(trained).predict(&row).unwrap();
        let after = YieldModel::Trained(loaded).predict(&row).unwrap();
        assert_eq!(before.predicted_yield, after.predicted_yield);
        assert_eq!(before.confidence, after.confidence);
    }

    #[test]
    fn missing_artifact_loads_as_none() {
        let path = temp_artifact_path("missing_never_written");
        assert!(load_artifact(&path).unwrap().is_none());
    }

    #[test]
    fn save_overwrites_a_previous_artifact() {
        let path = temp_artifact_path("overwrite");
        let first = YieldModel::train(&synthetic::generate(60, 1)).unwrap();
        let second = YieldModel::train(&synthetic::generate(60, 2)).unwrap();

        save_artifact(&first, &path).unwrap();
        save_artifact(&second, &path).unwrap();
        let loaded = load_artifact(&path).unwrap().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.trained_at, second.trained_at);
    }
}

// =============================================================================
// Model Handle Tests
// =============================================================================

mod model_handle {
    use super::*;

    #[test]
    fn handle_starts_with_the_initial_model() {
        let handle = ModelHandle::new(YieldModel::Untrained);
        assert!(!handle.snapshot().is_trained());
    }

    #[test]
    fn replace_swaps_the_served_snapshot() {
        let handle = ModelHandle::new(YieldModel::Untrained);
        let trained = YieldModel::train(&synthetic::generate(60, 5)).unwrap();

        handle.replace(YieldModel::Trained(trained));
        assert!(handle.snapshot().is_trained());
    }

    #[test]
    fn held_snapshot_survives_a_swap() {
        let handle = ModelHandle::new(YieldModel::Untrained);
        let before_swap = handle.snapshot();

        let trained = YieldModel::train(&synthetic::generate(60, 5)).unwrap();
        handle.replace(YieldModel::Trained(trained));

        // The reader that took a snapshot keeps serving the old model
        assert!(!before_swap.is_trained());
        assert!(handle.snapshot().is_trained());
    }

    #[test]
    fn clones_share_the_same_slot() {
        let handle = ModelHandle::new(YieldModel::Untrained);
        let clone = handle.clone();

        let trained = YieldModel::train(&synthetic::generate(60, 5)).unwrap();
        clone.replace(YieldModel::Trained(trained));

        assert!(handle.snapshot().is_trained());
    }
}
