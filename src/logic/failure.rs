//! Failure-Mode Decomposer
//!
//! Five named failure-mode probabilities derived from raw physical
//! quantities, independent of the classifier. Piecewise-linear clamps with
//! thresholds calibrated against the source dataset's failure taxonomy.

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureSchema, FeatureVector};
use crate::logic::telemetry::TelemetrySnapshot;

/// Tool wear beyond this is critical (minutes)
const TOOL_WEAR_CRITICAL_MIN: f32 = 200.0;
/// Temperature differential above this impedes heat dissipation (K)
const TEMP_DIFF_CONCERN_K: f32 = 10.0;
/// Nominal torque; falling below it signals power trouble (N·m)
const TORQUE_NOMINAL_NM: f32 = 40.0;
/// Mechanical power below this also signals power trouble (W)
const POWER_LOW_W: f32 = 5000.0;
/// Rotational speed above this risks overstrain (rpm)
const SPEED_OVERSTRAIN_RPM: f32 = 1800.0;

/// Named failure modes from the dataset taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FailureMode {
    /// Tool wear failure
    Twf,
    /// Heat dissipation failure
    Hdf,
    /// Power failure
    Pwf,
    /// Overstrain failure
    Osf,
    /// Random failure
    Rnf,
}

impl FailureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureMode::Twf => "TWF",
            FailureMode::Hdf => "HDF",
            FailureMode::Pwf => "PWF",
            FailureMode::Osf => "OSF",
            FailureMode::Rnf => "RNF",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-mode probabilities, each in [0, 1], rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct FailureModeProfile {
    pub twf: f32,
    pub hdf: f32,
    pub pwf: f32,
    pub osf: f32,
    pub rnf: f32,
}

impl FailureModeProfile {
    pub fn get(&self, mode: FailureMode) -> f32 {
        match mode {
            FailureMode::Twf => self.twf,
            FailureMode::Hdf => self.hdf,
            FailureMode::Pwf => self.pwf,
            FailureMode::Osf => self.osf,
            FailureMode::Rnf => self.rnf,
        }
    }
}

// ============================================================================
// PHYSICAL INPUTS
// ============================================================================

/// Raw physical quantities the decomposer works from
#[derive(Debug, Clone, Copy)]
pub struct PhysicalInputs {
    pub tool_wear: f32,
    pub air_temperature: f32,
    pub process_temperature: f32,
    pub rotational_speed: f32,
    pub torque: f32,
}

impl PhysicalInputs {
    /// Prefer the vector slot carrying the canonical dataset column; fall
    /// back to the normalized telemetry when the schema renamed it away.
    pub fn gather(
        schema: &FeatureSchema,
        vector: &FeatureVector,
        telemetry: &TelemetrySnapshot,
    ) -> Self {
        let slot = |name: &str, fallback: f32| {
            schema
                .index_of(name)
                .and_then(|i| vector.get(i))
                .unwrap_or(fallback)
        };

        Self {
            tool_wear: slot("Tool wear min", telemetry.tool_wear),
            air_temperature: slot("Air temperature K", telemetry.air_temperature),
            process_temperature: slot("Process temperature K", telemetry.process_temperature),
            rotational_speed: slot("Rotational speed rpm", telemetry.rotational_speed),
            torque: slot("Torque Nm", telemetry.torque),
        }
    }

    pub fn temperature_difference(&self) -> f32 {
        self.process_temperature - self.air_temperature
    }

    /// Recomputed from speed and torque even when the schema carries a
    /// mechanical-power column
    pub fn mechanical_power(&self) -> f32 {
        2.0 * std::f32::consts::PI * self.rotational_speed / 60.0 * self.torque
    }
}

impl From<&TelemetrySnapshot> for PhysicalInputs {
    fn from(telemetry: &TelemetrySnapshot) -> Self {
        Self {
            tool_wear: telemetry.tool_wear,
            air_temperature: telemetry.air_temperature,
            process_temperature: telemetry.process_temperature,
            rotational_speed: telemetry.rotational_speed,
            torque: telemetry.torque,
        }
    }
}

// ============================================================================
// DECOMPOSITION
// ============================================================================

/// Decompose the overall failure risk into per-mode probabilities
pub fn decompose(inputs: &PhysicalInputs) -> FailureModeProfile {
    let tool_wear = inputs.tool_wear;
    let temp_diff = inputs.temperature_difference();
    let speed = inputs.rotational_speed;
    let torque = inputs.torque;
    let power = inputs.mechanical_power();

    // TWF: wear past 200 min ramps to certainty over the next 100 min
    let twf = if tool_wear > TOOL_WEAR_CRITICAL_MIN {
        clamp01((tool_wear - TOOL_WEAR_CRITICAL_MIN) / 100.0)
    } else {
        clamp01((tool_wear / TOOL_WEAR_CRITICAL_MIN) * 0.5)
    };

    // HDF: differential past 10 K ramps to certainty over the next 10 K
    let hdf = if temp_diff > TEMP_DIFF_CONCERN_K {
        clamp01((temp_diff - TEMP_DIFF_CONCERN_K) / 10.0)
    } else {
        clamp01((temp_diff / TEMP_DIFF_CONCERN_K) * 0.3)
    };

    // PWF: torque under nominal, or mechanical power under 5 kW
    let mut pwf = if torque < TORQUE_NOMINAL_NM {
        clamp01((TORQUE_NOMINAL_NM - torque) / 20.0)
    } else {
        0.0
    };
    if power < POWER_LOW_W {
        pwf = pwf.max(clamp01((POWER_LOW_W - power) / 3000.0));
    }

    // OSF: speed past 1800 rpm ramps to certainty over the next 400 rpm
    let osf = if speed > SPEED_OVERSTRAIN_RPM {
        clamp01((speed - SPEED_OVERSTRAIN_RPM) / 400.0)
    } else {
        clamp01((speed / SPEED_OVERSTRAIN_RPM) * 0.2)
    };

    // RNF: weighted composite of the other four, not independently derived
    let rnf = clamp01(0.3 * twf + 0.3 * hdf + 0.2 * pwf + 0.2 * osf);

    FailureModeProfile {
        twf: round3(twf),
        hdf: round3(hdf),
        pwf: round3(pwf),
        osf: round3(osf),
        rnf: round3(rnf),
    }
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

// ============================================================================
// TESTS
// ============================================================================
