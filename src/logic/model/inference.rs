//! Inference Adapter - ONNX Runtime Integration
//!
//! Wraps the exported classifier behind the `Classifier` trait so the rest
//! of the engine never touches the runtime. The session run call takes
//! `&mut`, so access is serialized behind a mutex rather than assuming the
//! runtime is thread-safe.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use std::path::Path;
use thiserror::Error;

use super::artifacts::ArtifactError;
use crate::logic::features::FeatureVector;

/// Outcome of one classifier invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceResult {
    /// Probability of machine failure (class 1), 0.0 - 1.0
    pub failure_probability: f32,
    /// Binary failure prediction
    pub failure_predicted: bool,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model input error: {0}")]
    Input(String),

    #[error("inference failed: {0}")]
    Session(String),

    #[error("model produced no probability output")]
    MissingProbability,
}

/// Opaque trained classifier.
///
/// Probability and label come from one call over the same vector; the
/// exported graph yields both outputs in a single run.
pub trait Classifier: Send + Sync {
    fn predict(&self, vector: &FeatureVector) -> Result<InferenceResult, InferenceError>;

    /// Global nonnegative per-feature importance, one weight per schema name
    fn importance(&self) -> &[f32];
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_names: Vec<String>,
    importance: Vec<f32>,
    feature_count: usize,
}

impl OnnxClassifier {
    /// Load the exported model and probe it with a nominal vector, so a
    /// model trained against a different schema width fails at startup
    /// instead of on the first live request.
    pub fn load(
        model_path: &Path,
        importance: Vec<f32>,
        feature_count: usize,
    ) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            return Err(ArtifactError::Missing(model_path.to_path_buf()));
        }

        tracing::info!("Loading ONNX model from: {}", model_path.display());

        let malformed = |reason: String| ArtifactError::Malformed {
            path: model_path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .map_err(|e| malformed(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| malformed(format!("optimization level: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| malformed(format!("load: {e}")))?;

        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();

        let classifier = Self {
            session: Mutex::new(session),
            output_names,
            importance,
            feature_count,
        };

        let probe = FeatureVector::from_values(vec![0.0; feature_count]);
        classifier
            .predict(&probe)
            .map_err(|e| ArtifactError::IncompatibleModel {
                width: feature_count,
                reason: e.to_string(),
            })?;

        tracing::info!("ONNX model loaded successfully");
        Ok(classifier)
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, vector: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        if vector.len() != self.feature_count {
            return Err(InferenceError::Input(format!(
                "expected {} features, got {}",
                self.feature_count,
                vector.len()
            )));
        }

        let input_array =
            Array2::<f32>::from_shape_vec((1, self.feature_count), vector.as_slice().to_vec())
                .map_err(|e| InferenceError::Input(format!("array error: {e}")))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Input(format!("tensor error: {e}")))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Session(e.to_string()))?;

        // Exported binary classifiers carry a probabilities tensor and
        // usually an int64 label tensor. When the graph omits the label,
        // fall back to the 0.5 decision boundary.
        let mut probability: Option<f32> = None;
        let mut label: Option<bool> = None;

        for name in &self.output_names {
            let Some(output) = outputs.get(name) else {
                continue;
            };

            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if label.is_none() {
                    if let Some(&first) = data.first() {
                        label = Some(first != 0);
                    }
                }
                continue;
            }

            if probability.is_none() {
                if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                    probability = match data.len() {
                        0 => None,
                        // Single sigmoid output
                        1 => Some(data[0]),
                        // [p(healthy), p(failure)]
                        _ => Some(data[data.len() - 1]),
                    };
                }
            }
        }

        let failure_probability = probability.ok_or(InferenceError::MissingProbability)?;
        let failure_predicted = label.unwrap_or(failure_probability >= 0.5);

        Ok(InferenceResult {
            failure_probability,
            failure_predicted,
        })
    }

    fn importance(&self) -> &[f32] {
        &self.importance
    }
}
