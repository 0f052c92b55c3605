//! Prediction handler

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::logic::predictor::PredictionReport;
use crate::{AppResult, AppState};

/// Inbound prediction request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default = "default_machine_id")]
    pub machine_id: String,

    /// Raw telemetry mapping. Unknown keys are ignored and missing fields
    /// fall back to nominal values, so a partial payload is fine.
    #[serde(default)]
    pub telemetry: HashMap<String, Value>,
}

fn default_machine_id() -> String {
    "unknown".to_string()
}

/// Run one prediction over the supplied telemetry
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictionReport>> {
    let report = state.engine.predict(&req.machine_id, &req.telemetry)?;
    Ok(Json(report))
}
