//! Central Domain Constants
//!
//! Single source of truth for sensor defaults and report sizing.
//! The physical values are the nominal operating point of the source
//! dataset; the feature vector builder, attribution engine and failure-mode
//! decomposer all compare against them.

/// Model version reported in every prediction
pub const MODEL_VERSION: &str = "1.0.0";

// ============================================
// Nominal sensor values (fallbacks for missing telemetry)
// ============================================

/// Air temperature (Kelvin)
pub const DEFAULT_AIR_TEMPERATURE_K: f32 = 300.0;

/// Process temperature (Kelvin)
pub const DEFAULT_PROCESS_TEMPERATURE_K: f32 = 310.0;

/// Rotational speed (rpm)
pub const DEFAULT_ROTATIONAL_SPEED_RPM: f32 = 1500.0;

/// Torque (N·m)
pub const DEFAULT_TORQUE_NM: f32 = 40.0;

/// Tool wear (minutes)
pub const DEFAULT_TOOL_WEAR_MIN: f32 = 0.0;

/// Encoded product type
pub const DEFAULT_MACHINE_TYPE: f32 = 0.0;

/// Temperature differential, used when only the engineered feature is in
/// the schema (K)
pub const DEFAULT_TEMPERATURE_DIFFERENCE_K: f32 = 10.0;

/// Mechanical power, used when only the engineered feature is in the
/// schema (W)
pub const DEFAULT_MECHANICAL_POWER_W: f32 = 100.0;

// ============================================
// Report sizing
// ============================================

/// Features surfaced in the attribution report
pub const TOP_ATTRIBUTED_FEATURES: usize = 6;

/// Attributed features mapped to failure modes
pub const TOP_RESPONSIBLE_FEATURES: usize = 5;

// ============================================
// Artifact file names inside MODEL_DIR
// ============================================

/// Exported classifier graph
pub const MODEL_FILE: &str = "model.onnx";

/// Ordered feature names, one per line
pub const FEATURE_NAMES_FILE: &str = "feature_names.txt";

/// Global per-feature importance weights, one per line
pub const FEATURE_IMPORTANCE_FILE: &str = "feature_importance.txt";
