//! Model artifact persistence
//!
//! The pipeline, ensemble, and diagnostics are persisted as one opaque JSON
//! unit. Saves write to a temporary sibling file and rename into place, so a
//! reader never observes a partially written artifact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::TrainedYieldModel;
use super::MlError;

/// Current artifact format version
const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format_version: u32,
    model: TrainedYieldModel,
}

/// Persist a trained model, replacing any previous artifact atomically
pub fn save_artifact(model: &TrainedYieldModel, path: &Path) -> Result<(), MlError> {
    let artifact = ModelArtifact {
        format_version: ARTIFACT_VERSION,
        model: model.clone(),
    };
    let payload = serde_json::to_vec(&artifact)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load a persisted model; `Ok(None)` when no artifact exists yet
pub fn load_artifact(path: &Path) -> Result<Option<TrainedYieldModel>, MlError> {
    if !path.exists() {
        return Ok(None);
    }
    let payload = fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&payload)?;
    if artifact.format_version != ARTIFACT_VERSION {
        return Err(MlError::IncompatibleArtifact(artifact.format_version));
    }
    Ok(Some(artifact.model))
}
