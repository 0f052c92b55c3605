//! Model artifacts
//!
//! The training pipeline persists three files the service consumes:
//! `model.onnx`, `feature_names.txt` and `feature_importance.txt`. (It also
//! writes a label encoder, but that one is only read back at training time.)
//! Anything absent or structurally incompatible aborts startup.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{FEATURE_IMPORTANCE_FILE, FEATURE_NAMES_FILE, MODEL_FILE};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact missing: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("feature importance has {actual} weights but the schema has {expected} names")]
    ImportanceMismatch { expected: usize, actual: usize },

    #[error("model rejected a {width}-feature input: {reason}")]
    IncompatibleModel { width: usize, reason: String },
}

/// Resolved artifact paths inside the model directory
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: PathBuf,
    pub feature_names: PathBuf,
    pub feature_importance: PathBuf,
}

impl ModelArtifacts {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            feature_names: dir.join(FEATURE_NAMES_FILE),
            feature_importance: dir.join(FEATURE_IMPORTANCE_FILE),
        }
    }
}

/// Load the global per-feature importance vector (one weight per line).
///
/// The ONNX graph does not carry the booster's importances, so the training
/// pipeline exports them separately. Weights must be finite and
/// nonnegative, and the count must equal the schema length — a mismatch
/// means the artifacts came from different training runs.
pub fn load_importance(path: &Path, expected: usize) -> Result<Vec<f32>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut weights = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let weight: f32 = line.parse().map_err(|_| ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: format!("line {} is not a number: {:?}", lineno + 1, line),
        })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(ArtifactError::Malformed {
                path: path.to_path_buf(),
                reason: format!("line {} is not a nonnegative weight: {}", lineno + 1, weight),
            });
        }
        weights.push(weight);
    }

    if weights.len() != expected {
        return Err(ArtifactError::ImportanceMismatch {
            expected,
            actual: weights.len(),
        });
    }

    Ok(weights)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_importance() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.12").unwrap();
        writeln!(file, "0.0").unwrap();
        writeln!(file, " 0.88 ").unwrap();

        let weights = load_importance(file.path(), 3).unwrap();
        assert_eq!(weights, vec![0.12, 0.0, 0.88]);
    }

    #[test]
    fn test_importance_length_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5").unwrap();

        let result = load_importance(file.path(), 2);
        assert!(matches!(
            result,
            Err(ArtifactError::ImportanceMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_importance_rejects_negative_weight() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-0.1").unwrap();

        let result = load_importance(file.path(), 1);
        assert!(matches!(result, Err(ArtifactError::Malformed { .. })));
    }

    #[test]
    fn test_importance_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not-a-number").unwrap();

        let result = load_importance(file.path(), 1);
        assert!(matches!(result, Err(ArtifactError::Malformed { .. })));
    }

    #[test]
    fn test_importance_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_importance(&dir.path().join(FEATURE_IMPORTANCE_FILE), 1);
        assert!(matches!(result, Err(ArtifactError::Missing(_))));
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ModelArtifacts::in_dir(Path::new("models"));
        assert_eq!(paths.model, Path::new("models").join(MODEL_FILE));
        assert_eq!(paths.feature_names, Path::new("models").join(FEATURE_NAMES_FILE));
    }
}
