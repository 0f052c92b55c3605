use serde::{Deserialize, Serialize};

use crate::logic::failure::FailureMode;

/// One ranked, signed feature attribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    pub feature: String,
    pub value: f32,
    /// Display-scaled raw importance (importance x 10)
    #[serde(rename = "shapValue")]
    pub shap_value: f32,
    /// Signed contribution, -100 to 100; negative pushes toward failure
    pub impact: f32,
}

/// A failure mode a feature is held responsible for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureAttribution {
    pub failure_type: FailureMode,
    pub probability: f32,
    pub reason: String,
}

/// Feature linked to the failure modes it drives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsibility {
    pub feature: String,
    pub value: f32,
    pub responsible_for: Vec<FailureAttribution>,
}
