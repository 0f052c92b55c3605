//! Logic Module - Inference Engines
//!
//! - `telemetry` - raw telemetry normalization
//! - `features/` - feature schema discovery + vector reconstruction
//! - `model/` - classifier artifacts and ONNX inference
//! - `risk` - health score and risk tiers
//! - `failure` - failure-mode decomposition
//! - `explain/` - attribution and responsibility mapping
//! - `predictor` - orchestration and response assembly

pub mod explain;
pub mod failure;
pub mod features;
pub mod model;
pub mod predictor;
pub mod risk;
pub mod telemetry;
