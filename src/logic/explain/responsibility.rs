//! Responsibility Mapper
//!
//! Ties each top attributed feature back to the failure modes its name
//! implicates, with an operator-readable reason per link.

use super::types::{FailureAttribution, Responsibility};
use crate::constants::TOP_RESPONSIBLE_FEATURES;
use crate::logic::failure::{FailureMode, FailureModeProfile};
use crate::logic::features::{FeatureSchema, FeatureVector};

/// Air temperature above this starts contributing to heat-dissipation
/// risk (K)
const AIR_TEMP_CONTRIBUTION_K: f32 = 310.0;

/// Map the top attributed features (same ranking as the attribution
/// engine) to failure modes. Features implicating no mode are dropped.
pub fn map_responsibilities(
    schema: &FeatureSchema,
    vector: &FeatureVector,
    ranked: &[usize],
    profile: &FailureModeProfile,
) -> Vec<Responsibility> {
    ranked
        .iter()
        .take(TOP_RESPONSIBLE_FEATURES)
        .filter_map(|&idx| {
            let feature = schema.name(idx).unwrap_or("unknown").to_string();
            let value = vector.get(idx).unwrap_or(0.0);
            let responsible_for = feature_responsibility(&feature, value, profile);
            if responsible_for.is_empty() {
                None
            } else {
                Some(Responsibility {
                    feature,
                    value,
                    responsible_for,
                })
            }
        })
        .collect()
}

/// Failure modes a single feature is associated with. A feature may map to
/// several, or to none.
pub fn feature_responsibility(
    feature: &str,
    value: f32,
    profile: &FailureModeProfile,
) -> Vec<FailureAttribution> {
    let lower = feature.to_lowercase();
    let mut responsibilities = Vec::new();

    if lower.contains("wear") {
        responsibilities.push(FailureAttribution {
            failure_type: FailureMode::Twf,
            probability: profile.twf,
            reason: format!("Tool wear value ({value:.1} min) indicates potential tool wear failure"),
        });
    }

    if lower.contains("temperature") {
        if lower.contains("difference") || lower.contains("process") {
            responsibilities.push(FailureAttribution {
                failure_type: FailureMode::Hdf,
                probability: profile.hdf,
                reason: format!("Temperature value ({value:.1}K) suggests heat dissipation issues"),
            });
        } else if lower.contains("air") && value > AIR_TEMP_CONTRIBUTION_K {
            // Air temperature alone is weak evidence; count it at half weight
            responsibilities.push(FailureAttribution {
                failure_type: FailureMode::Hdf,
                probability: profile.hdf * 0.5,
                reason: format!("High air temperature ({value:.1}K) may contribute to heat issues"),
            });
        }
    }

    if lower.contains("torque") || lower.contains("power") {
        responsibilities.push(FailureAttribution {
            failure_type: FailureMode::Pwf,
            probability: profile.pwf,
            reason: format!("Power-related value ({value:.1}) indicates potential power failure"),
        });
    }

    if lower.contains("speed") || lower.contains("rotational") {
        responsibilities.push(FailureAttribution {
            failure_type: FailureMode::Osf,
            probability: profile.osf,
            reason: format!("Rotational speed ({value:.1} rpm) may cause overstrain"),
        });
    }

    responsibilities
}

// ============================================================================
// TESTS
// ============================================================================
