//! Explain Module - attribution and failure-mode responsibility
//!
//! Approximates model interpretability without an explainability library:
//! the classifier's global importances rank the features, domain-directional
//! heuristics sign them, and name keywords tie them back to failure modes.

pub mod attribution;
pub mod responsibility;
pub mod types;

pub use attribution::{attribute, rank_by_importance};
pub use responsibility::map_responsibilities;
pub use types::{Attribution, FailureAttribution, Responsibility};
