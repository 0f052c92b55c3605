//! Risk Scorer
//!
//! Maps the failure probability to a 0-100 health score and an ordinal risk
//! tier. The tier mapping is a pure step function, no hysteresis.

use serde::{Deserialize, Serialize};

/// Risk tiers, ordered from healthy to failing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Tier for a health score. Breakpoints are inclusive on the high side:
    /// a score of exactly 75 is still low risk.
    pub fn from_health_score(score: f32) -> Self {
        if score >= 75.0 {
            RiskLevel::Low
        } else if score >= 50.0 {
            RiskLevel::Medium
        } else if score >= 25.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health score: inverse failure probability on a 0-100 scale, one decimal
pub fn health_score(failure_probability: f32) -> f32 {
    ((1.0 - failure_probability) * 1000.0).round() / 10.0
}

/// Per-tier probability block for the dashboard gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProbabilities {
    pub low: f32,
    pub medium: f32,
    pub high: f32,
    pub critical: f32,
}

/// The selected tier carries a live value, the rest a 0.1 floor.
// TODO: the 0.1 floor on non-selected tiers predates the current dashboard
// gauge; confirm with the dashboard whether it still expects a floor.
pub fn tier_probabilities(risk: RiskLevel, failure_probability: f32) -> TierProbabilities {
    TierProbabilities {
        low: if risk == RiskLevel::Low { 1.0 - failure_probability } else { 0.1 },
        medium: if risk == RiskLevel::Medium { 0.3 } else { 0.1 },
        high: if risk == RiskLevel::High { failure_probability * 0.6 } else { 0.1 },
        critical: if risk == RiskLevel::Critical { failure_probability } else { 0.1 },
    }
}

/// Tier-specific explanation for the operator
pub fn explanation(machine_id: &str, risk: RiskLevel, failure_probability: f32) -> String {
    let percent = failure_probability * 100.0;
    match risk {
        RiskLevel::Low => format!(
            "Machine {machine_id} shows excellent health indicators. All telemetry parameters are within normal operating ranges. Failure probability: {percent:.1}%"
        ),
        RiskLevel::Medium => format!(
            "Machine {machine_id} shows moderate performance. Some telemetry parameters indicate potential maintenance needs. Failure probability: {percent:.1}%"
        ),
        RiskLevel::High => format!(
            "Machine {machine_id} shows concerning trends. Multiple telemetry parameters suggest increased failure risk. Failure probability: {percent:.1}%"
        ),
        RiskLevel::Critical => format!(
            "Machine {machine_id} is in critical condition. High failure probability detected: {percent:.1}%. Urgent maintenance required."
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
