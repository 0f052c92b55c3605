//! Telemetry Normalizer
//!
//! Accepts telemetry under canonical internal names or the original dataset
//! column names and produces a fixed six-field snapshot. Missing or
//! non-numeric fields fall back to nominal operating values so the service
//! can still answer with partial sensor data. Unknown keys are ignored.

use serde_json::Value;
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_AIR_TEMPERATURE_K, DEFAULT_MACHINE_TYPE, DEFAULT_PROCESS_TEMPERATURE_K,
    DEFAULT_ROTATIONAL_SPEED_RPM, DEFAULT_TOOL_WEAR_MIN, DEFAULT_TORQUE_NM,
};

/// Normalized sensor snapshot, one value per physical channel
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub air_temperature: f32,
    pub process_temperature: f32,
    pub rotational_speed: f32,
    pub torque: f32,
    pub tool_wear: f32,
    /// Product type, label-encoded upstream (L/M/H -> 0/1/2)
    pub machine_type: f32,
}

impl TelemetrySnapshot {
    /// Engineered feature: process minus air temperature (K)
    pub fn temperature_difference(&self) -> f32 {
        self.process_temperature - self.air_temperature
    }

    /// Engineered feature: SI mechanical power from rpm and torque (W)
    pub fn mechanical_power(&self) -> f32 {
        2.0 * std::f32::consts::PI * self.rotational_speed / 60.0 * self.torque
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            air_temperature: DEFAULT_AIR_TEMPERATURE_K,
            process_temperature: DEFAULT_PROCESS_TEMPERATURE_K,
            rotational_speed: DEFAULT_ROTATIONAL_SPEED_RPM,
            torque: DEFAULT_TORQUE_NM,
            tool_wear: DEFAULT_TOOL_WEAR_MIN,
            machine_type: DEFAULT_MACHINE_TYPE,
        }
    }
}

/// Normalize a raw telemetry mapping.
///
/// Resolution order per field: canonical name, then legacy dataset column
/// name, then the nominal default.
pub fn normalize(raw: &HashMap<String, Value>) -> TelemetrySnapshot {
    TelemetrySnapshot {
        air_temperature: field(raw, "air_temperature", "Air temperature K", DEFAULT_AIR_TEMPERATURE_K),
        process_temperature: field(raw, "process_temperature", "Process temperature K", DEFAULT_PROCESS_TEMPERATURE_K),
        rotational_speed: field(raw, "rotational_speed", "Rotational speed rpm", DEFAULT_ROTATIONAL_SPEED_RPM),
        torque: field(raw, "torque", "Torque Nm", DEFAULT_TORQUE_NM),
        tool_wear: field(raw, "tool_wear", "Tool wear min", DEFAULT_TOOL_WEAR_MIN),
        machine_type: field(raw, "type", "Type", DEFAULT_MACHINE_TYPE),
    }
}

fn field(raw: &HashMap<String, Value>, canonical: &str, legacy: &str, default: f32) -> f32 {
    numeric(raw.get(canonical))
        .or_else(|| numeric(raw.get(legacy)))
        .unwrap_or(default)
}

// Non-numeric values are treated as absent; the field defaults
fn numeric(value: Option<&Value>) -> Option<f32> {
    value.and_then(Value::as_f64).map(|v| v as f32)
}

// ============================================================================
// TESTS
// ============================================================================
