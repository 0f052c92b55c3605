//! Attribution Engine
//!
//! Ranks features by the classifier's global importance and signs each one
//! with domain-directional heuristics: wear and heat above baseline are
//! always unhealthy, everything else follows the binary prediction.

use super::types::Attribution;
use crate::constants::{
    DEFAULT_AIR_TEMPERATURE_K, DEFAULT_PROCESS_TEMPERATURE_K, DEFAULT_TOOL_WEAR_MIN,
    TOP_ATTRIBUTED_FEATURES,
};
use crate::logic::features::{FeatureSchema, FeatureVector};

/// Indices of all features ordered by importance descending.
///
/// Stable: ties keep schema order.
pub fn rank_by_importance(importance: &[f32]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..importance.len()).collect();
    indices.sort_by(|&a, &b| {
        importance[b]
            .partial_cmp(&importance[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Top-K signed attributions for the current vector
pub fn attribute(
    schema: &FeatureSchema,
    vector: &FeatureVector,
    importance: &[f32],
    ranked: &[usize],
    failure_predicted: bool,
) -> Vec<Attribution> {
    // All-zero importances would divide to NaN; substitute a unit divisor
    let max_importance = importance.iter().cloned().fold(0.0f32, f32::max);
    let max_importance = if max_importance > 0.0 { max_importance } else { 1.0 };

    ranked
        .iter()
        .take(TOP_ATTRIBUTED_FEATURES)
        .map(|&idx| {
            let feature = schema.name(idx).unwrap_or("unknown").to_string();
            let value = vector.get(idx).unwrap_or(0.0);
            let raw = importance[idx];
            let magnitude = (raw / max_importance) * 100.0;
            Attribution {
                impact: signed_impact(&feature, value, magnitude, failure_predicted),
                shap_value: raw * 10.0,
                feature,
                value,
            }
        })
        .collect()
}

/// Sign rules, first applicable wins: wear above baseline is unhealthy,
/// temperature above its baseline is unhealthy, anything else follows the
/// prediction.
fn signed_impact(feature: &str, value: f32, magnitude: f32, failure_predicted: bool) -> f32 {
    let lower = feature.to_lowercase();

    let unhealthy = if lower.contains("wear") {
        value > DEFAULT_TOOL_WEAR_MIN
    } else if lower.contains("temperature") {
        let baseline = if lower.contains("process") {
            DEFAULT_PROCESS_TEMPERATURE_K
        } else {
            DEFAULT_AIR_TEMPERATURE_K
        };
        value > baseline
    } else {
        failure_predicted
    };

    if unhealthy {
        -magnitude.abs()
    } else {
        magnitude.abs()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::build_vector;
    use crate::logic::telemetry::TelemetrySnapshot;

    fn schema() -> FeatureSchema {
        FeatureSchema::from_names(vec![
            "Type".into(),
            "Air temperature K".into(),
            "Process temperature K".into(),
            "Rotational speed rpm".into(),
            "Torque Nm".into(),
            "Tool wear min".into(),
            "temperature_difference".into(),
            "Mechanical Power W".into(),
        ])
    }

    #[test]
    fn test_ranking_descending_with_stable_ties() {
        let ranked = rank_by_importance(&[0.1, 0.5, 0.5, 0.9, 0.0]);
        assert_eq!(ranked, vec![3, 1, 2, 0, 4]);
    }

    #[test]
    fn test_attribution_takes_top_six() {
        let importance = [0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.02, 0.01];
        let schema = schema();
        let vector = build_vector(&schema, &TelemetrySnapshot::default());
        let ranked = rank_by_importance(&importance);

        let attributions = attribute(&schema, &vector, &importance, &ranked, false);
        assert_eq!(attributions.len(), 6);
        // Highest importance first
        assert_eq!(attributions[0].feature, "Tool wear min");
        assert_eq!(attributions[0].impact.abs(), 100.0);
        // shapValue is the display-scaled raw importance
        assert!((attributions[0].shap_value - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_importance_does_not_divide_by_zero() {
        let importance = [0.0; 8];
        let schema = schema();
        let vector = build_vector(&schema, &TelemetrySnapshot::default());
        let ranked = rank_by_importance(&importance);

        let attributions = attribute(&schema, &vector, &importance, &ranked, false);
        for attribution in attributions {
            assert!(attribution.impact.is_finite());
            assert_eq!(attribution.impact, 0.0);
        }
    }

    #[test]
    fn test_wear_above_baseline_is_negative() {
        assert!(signed_impact("Tool wear min", 120.0, 80.0, false) < 0.0);
        assert!(signed_impact("Tool wear min", 0.0, 80.0, false) > 0.0);
    }

    #[test]
    fn test_temperature_sign_uses_matching_baseline() {
        // Process baseline is 310
        assert!(signed_impact("Process temperature K", 315.0, 50.0, false) < 0.0);
        assert!(signed_impact("Process temperature K", 308.0, 50.0, false) > 0.0);
        // Air baseline is 300
        assert!(signed_impact("Air temperature K", 305.0, 50.0, false) < 0.0);
        assert!(signed_impact("Air temperature K", 295.0, 50.0, false) > 0.0);
    }

    #[test]
    fn test_other_features_follow_prediction() {
        assert!(signed_impact("Torque Nm", 40.0, 50.0, true) < 0.0);
        assert!(signed_impact("Torque Nm", 40.0, 50.0, false) > 0.0);
    }

    #[test]
    fn test_wear_rule_wins_over_prediction_rule() {
        // Healthy prediction but worn tool: the wear rule applies first
        assert!(signed_impact("Tool wear min", 150.0, 60.0, false) < 0.0);
    }
}
