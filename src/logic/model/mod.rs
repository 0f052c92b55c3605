//! Model Module - classifier artifacts and inference
//!
//! The trained classifier is an opaque collaborator: the training pipeline
//! persists the exported graph plus its schema and importance artifacts,
//! and this module loads them and answers predictions.

pub mod artifacts;
pub mod inference;

pub use artifacts::{ArtifactError, ModelArtifacts};
pub use inference::{Classifier, InferenceError, InferenceResult, OnnxClassifier};
