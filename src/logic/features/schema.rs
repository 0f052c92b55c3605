//! Feature Schema - ordered model input names
//!
//! Loaded once per process from `feature_names.txt` (one name per line,
//! written by the training pipeline). The order defines the model's input
//! column order; the names are the vocabulary the resolver pattern-matches
//! against. Immutable for the process lifetime.

use std::fs;
use std::path::Path;

use crate::logic::model::ArtifactError;

/// Ordered sequence of feature names expected by the classifier
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load the schema from the feature-names artifact
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(ArtifactError::Malformed {
                path: path.to_path_buf(),
                reason: "no feature names".to_string(),
            });
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of an exact schema name, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Canonical form used for rule matching: lowercase with separators and
/// brackets stripped
pub fn canon(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '[' | ']' | '(' | ')'))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
