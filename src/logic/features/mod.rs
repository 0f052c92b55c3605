//! Features Module - Schema discovery and vector reconstruction
//!
//! The model's input schema is read from an artifact at startup, so the
//! builder works against whatever names that schema carries instead of a
//! hardcoded layout.

pub mod schema;
pub mod vector;


// Re-export common types
pub use schema::FeatureSchema;
pub use vector::{build_vector, FeatureVector};
