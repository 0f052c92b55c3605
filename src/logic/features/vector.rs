//! Feature Vector Builder
//!
//! Rebuilds the model input row from a telemetry snapshot. Each schema name
//! is classified through an ordered rule list; names matching no rule get a
//! name-pattern default in a second pass, so the vector length always equals
//! the schema length.

use serde::Serialize;

use super::schema::{canon, FeatureSchema};
use crate::constants::{
    DEFAULT_AIR_TEMPERATURE_K, DEFAULT_MECHANICAL_POWER_W, DEFAULT_PROCESS_TEMPERATURE_K,
    DEFAULT_ROTATIONAL_SPEED_RPM, DEFAULT_TEMPERATURE_DIFFERENCE_K, DEFAULT_TOOL_WEAR_MIN,
    DEFAULT_TORQUE_NM,
};
use crate::logic::telemetry::TelemetrySnapshot;

/// Ordered feature values, positionally aligned with the schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

// ============================================================================
// NAME RESOLUTION RULES
// ============================================================================

/// Semantic channel a schema name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    AirTemperature,
    ProcessTemperature,
    RotationalSpeed,
    Torque,
    ToolWear,
    MachineType,
    /// Derived: process temperature minus air temperature
    TemperatureDifference,
    /// Derived: 2π·rpm/60·torque
    MechanicalPower,
}

impl FeatureSource {
    pub fn value(self, telemetry: &TelemetrySnapshot) -> f32 {
        match self {
            FeatureSource::AirTemperature => telemetry.air_temperature,
            FeatureSource::ProcessTemperature => telemetry.process_temperature,
            FeatureSource::RotationalSpeed => telemetry.rotational_speed,
            FeatureSource::Torque => telemetry.torque,
            FeatureSource::ToolWear => telemetry.tool_wear,
            FeatureSource::MachineType => telemetry.machine_type,
            FeatureSource::TemperatureDifference => telemetry.temperature_difference(),
            FeatureSource::MechanicalPower => telemetry.mechanical_power(),
        }
    }
}

type Predicate = fn(&str) -> bool;

fn is_air_temperature(n: &str) -> bool {
    n.contains("air") && n.contains("temperature")
}
fn is_process_temperature(n: &str) -> bool {
    n.contains("process") && n.contains("temperature")
}
fn is_rotational_speed(n: &str) -> bool {
    n.contains("rotational") || (n.contains("speed") && n.contains("rpm"))
}
fn is_torque(n: &str) -> bool {
    n.contains("torque")
}
fn is_tool_wear(n: &str) -> bool {
    n.contains("tool") && n.contains("wear")
}
fn is_machine_type(n: &str) -> bool {
    n == "type"
}
fn is_temperature_difference(n: &str) -> bool {
    n.contains("temperature") && n.contains("difference")
}
fn is_mechanical_power(n: &str) -> bool {
    n.contains("mechanical") && n.contains("power")
}

/// Ordered (predicate, source) rules over the canonical name.
///
/// Evaluated top to bottom, first match wins. The predicates are NOT
/// mutually exclusive on substring alone, so reordering changes behavior.
static RESOLUTION_RULES: &[(Predicate, FeatureSource)] = &[
    (is_air_temperature, FeatureSource::AirTemperature),
    (is_process_temperature, FeatureSource::ProcessTemperature),
    (is_rotational_speed, FeatureSource::RotationalSpeed),
    (is_torque, FeatureSource::Torque),
    (is_tool_wear, FeatureSource::ToolWear),
    (is_machine_type, FeatureSource::MachineType),
    (is_temperature_difference, FeatureSource::TemperatureDifference),
    (is_mechanical_power, FeatureSource::MechanicalPower),
];

/// Classify a canonical schema name, first matching rule wins
pub fn resolve(canonical: &str) -> Option<FeatureSource> {
    RESOLUTION_RULES
        .iter()
        .find(|(matches, _)| matches(canonical))
        .map(|&(_, source)| source)
}

/// Name-pattern default for schema names no rule recognizes.
///
/// Works on the ORIGINAL name: the air/process temperature split looks for
/// the literal "Air", case-sensitive.
pub fn pattern_default(name: &str) -> f32 {
    let lower = name.to_lowercase();
    if lower.contains("temperature") {
        if name.contains("Air") {
            DEFAULT_AIR_TEMPERATURE_K
        } else {
            DEFAULT_PROCESS_TEMPERATURE_K
        }
    } else if lower.contains("speed") {
        DEFAULT_ROTATIONAL_SPEED_RPM
    } else if lower.contains("torque") {
        DEFAULT_TORQUE_NM
    } else if lower.contains("wear") {
        DEFAULT_TOOL_WEAR_MIN
    } else if lower.contains("difference") {
        DEFAULT_TEMPERATURE_DIFFERENCE_K
    } else if lower.contains("power") {
        DEFAULT_MECHANICAL_POWER_W
    } else {
        0.0
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Build the model input vector in schema order.
///
/// Pass 1 resolves each name through the rule list; pass 2 fills anything
/// left unresolved with its name-pattern default.
pub fn build_vector(schema: &FeatureSchema, telemetry: &TelemetrySnapshot) -> FeatureVector {
    let resolved: Vec<Option<FeatureSource>> = schema
        .names()
        .iter()
        .map(|name| resolve(&canon(name)))
        .collect();

    let values = schema
        .names()
        .iter()
        .zip(resolved)
        .map(|(name, source)| match source {
            Some(source) => source.value(telemetry),
            None => pattern_default(name),
        })
        .collect();

    FeatureVector { values }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dataset_names() {
        assert_eq!(resolve(&canon("Air temperature K")), Some(FeatureSource::AirTemperature));
        assert_eq!(resolve(&canon("Process temperature K")), Some(FeatureSource::ProcessTemperature));
        assert_eq!(resolve(&canon("Rotational speed rpm")), Some(FeatureSource::RotationalSpeed));
        assert_eq!(resolve(&canon("Torque Nm")), Some(FeatureSource::Torque));
        assert_eq!(resolve(&canon("Tool wear min")), Some(FeatureSource::ToolWear));
        assert_eq!(resolve(&canon("Type")), Some(FeatureSource::MachineType));
        assert_eq!(resolve(&canon("temperature_difference")), Some(FeatureSource::TemperatureDifference));
        assert_eq!(resolve(&canon("Mechanical Power W")), Some(FeatureSource::MechanicalPower));
    }

    #[test]
    fn test_resolve_renamed_schema() {
        // Brackets and case are stripped before matching
        assert_eq!(resolve(&canon("air temperature [K]")), Some(FeatureSource::AirTemperature));
        // "speed" alone is not enough without "rpm"
        assert_eq!(resolve(&canon("Belt speed")), None);
        assert_eq!(resolve(&canon("Spindle speed rpm")), Some(FeatureSource::RotationalSpeed));
        // "type" must match exactly, not as a substring
        assert_eq!(resolve(&canon("Subtype")), None);
    }

    #[test]
    fn test_rule_order_air_before_difference() {
        // Contains both "air"+"temperature" and "difference"; the earlier
        // rule must win
        assert_eq!(
            resolve(&canon("Air temperature difference")),
            Some(FeatureSource::AirTemperature)
        );
    }

    #[test]
    fn test_pattern_defaults() {
        assert_eq!(pattern_default("Coolant temperature"), 310.0);
        assert_eq!(pattern_default("Air intake Temperature"), 300.0);
        assert_eq!(pattern_default("Belt speed"), 1500.0);
        assert_eq!(pattern_default("Backlash torque est"), 40.0);
        assert_eq!(pattern_default("Bearing wear idx"), 0.0);
        assert_eq!(pattern_default("Pressure difference"), 10.0);
        assert_eq!(pattern_default("Hydraulic power"), 100.0);
        assert_eq!(pattern_default("Vibration X"), 0.0);
    }

    #[test]
    fn test_derived_values() {
        let telemetry = TelemetrySnapshot {
            rotational_speed: 1000.0,
            torque: 40.0,
            ..Default::default()
        };
        let power = FeatureSource::MechanicalPower.value(&telemetry);
        assert!((power - 4188.79).abs() < 0.01);
        assert_eq!(FeatureSource::TemperatureDifference.value(&telemetry), 10.0);
    }

    #[test]
    fn test_vector_length_matches_any_schema() {
        let schema = FeatureSchema::from_names(vec![
            "Torque Nm".into(),
            "Unknown sensor".into(),
            "Another one".into(),
        ]);
        let vector = build_vector(&schema, &TelemetrySnapshot::default());
        assert_eq!(vector.len(), schema.len());
        assert_eq!(vector.get(0), Some(40.0));
        assert_eq!(vector.get(1), Some(0.0));
    }
}
