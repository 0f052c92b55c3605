//! Prediction Engine - orchestration and response assembly
//!
//! Owns the process-wide immutable state (feature schema + classifier),
//! built once at startup and injected into request handlers. Each
//! prediction is stateless: normalize the telemetry, rebuild the vector,
//! run the classifier once, then fan out to the risk scorer, attribution
//! engine and failure-mode decomposer.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::constants::MODEL_VERSION;
use crate::logic::explain::{
    attribute, map_responsibilities, rank_by_importance, Attribution, Responsibility,
};
use crate::logic::failure::{decompose, FailureModeProfile, PhysicalInputs};
use crate::logic::features::{build_vector, FeatureSchema};
use crate::logic::model::{
    artifacts, ArtifactError, Classifier, InferenceError, ModelArtifacts, OnnxClassifier,
};
use crate::logic::risk::{
    explanation, health_score, tier_probabilities, RiskLevel, TierProbabilities,
};
use crate::logic::telemetry::normalize;

/// Assembled prediction payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub score: f32,
    pub risk: RiskLevel,
    pub probability: TierProbabilities,
    pub explanation: String,
    pub shap_features: Vec<Attribution>,
    pub failure_types: FailureModeProfile,
    pub feature_responsibilities: Vec<Responsibility>,
    pub model_version: &'static str,
    pub timestamp: String,
    pub failure_probability: f32,
    pub failure_predicted: bool,
}

pub struct PredictionEngine {
    schema: FeatureSchema,
    classifier: Box<dyn Classifier>,
}

impl PredictionEngine {
    /// Load every artifact the engine needs; refuse to start without them
    pub fn from_artifacts(model_dir: &Path) -> Result<Self, ArtifactError> {
        let paths = ModelArtifacts::in_dir(model_dir);
        let schema = FeatureSchema::load(&paths.feature_names)?;
        let importance = artifacts::load_importance(&paths.feature_importance, schema.len())?;
        let classifier = OnnxClassifier::load(&paths.model, importance, schema.len())?;
        Ok(Self::new(schema, Box::new(classifier)))
    }

    /// Assemble an engine from parts. The classifier's importance vector
    /// must already match the schema length.
    pub fn new(schema: FeatureSchema, classifier: Box<dyn Classifier>) -> Self {
        Self { schema, classifier }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Run one full prediction for a machine's telemetry
    pub fn predict(
        &self,
        machine_id: &str,
        telemetry: &HashMap<String, Value>,
    ) -> Result<PredictionReport, InferenceError> {
        let snapshot = normalize(telemetry);
        let vector = build_vector(&self.schema, &snapshot);

        let inference = self.classifier.predict(&vector)?;
        let failure_probability = inference.failure_probability;

        let score = health_score(failure_probability);
        let risk = RiskLevel::from_health_score(score);

        let importance = self.classifier.importance();
        let ranked = rank_by_importance(importance);
        let shap_features = attribute(
            &self.schema,
            &vector,
            importance,
            &ranked,
            inference.failure_predicted,
        );

        let profile = decompose(&PhysicalInputs::gather(&self.schema, &vector, &snapshot));
        let feature_responsibilities =
            map_responsibilities(&self.schema, &vector, &ranked, &profile);

        Ok(PredictionReport {
            score,
            risk,
            probability: tier_probabilities(risk, failure_probability),
            explanation: explanation(machine_id, risk, failure_probability),
            shap_features,
            failure_types: profile,
            feature_responsibilities,
            model_version: MODEL_VERSION,
            timestamp: Utc::now().to_rfc3339(),
            failure_probability,
            failure_predicted: inference.failure_predicted,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::InferenceResult;
    use serde_json::json;

    /// Canned classifier so engine tests never need a model file
    struct StubClassifier {
        result: InferenceResult,
        importance: Vec<f32>,
    }

    impl Classifier for StubClassifier {
        fn predict(&self, _vector: &crate::logic::features::FeatureVector) -> Result<InferenceResult, InferenceError> {
            Ok(self.result)
        }

        fn importance(&self) -> &[f32] {
            &self.importance
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _vector: &crate::logic::features::FeatureVector) -> Result<InferenceResult, InferenceError> {
            Err(InferenceError::Session("boom".to_string()))
        }

        fn importance(&self) -> &[f32] {
            &[]
        }
    }

    fn dataset_schema() -> FeatureSchema {
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

    fn engine(probability: f32, predicted: bool) -> PredictionEngine {
        PredictionEngine::new(
            dataset_schema(),
            Box::new(StubClassifier {
                result: InferenceResult {
                    failure_probability: probability,
                    failure_predicted: predicted,
                },
                importance: vec![0.02, 0.1, 0.12, 0.08, 0.15, 0.3, 0.18, 0.05],
            }),
        )
    }

    fn telemetry(entries: &[(&str, Value)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_healthy_machine_report() {
        let report = engine(0.05, false)
            .predict("M-1", &HashMap::new())
            .unwrap();

        assert_eq!(report.score, 95.0);
        assert_eq!(report.risk, RiskLevel::Low);
        assert_eq!(report.failure_probability, 0.05);
        assert!(!report.failure_predicted);
        assert_eq!(report.model_version, "1.0.0");
        assert!(report.explanation.contains("Machine M-1"));
        assert!(report.explanation.contains("excellent health"));
        assert_eq!(report.shap_features.len(), 6);
        // Top importance is tool wear
        assert_eq!(report.shap_features[0].feature, "Tool wear min");
    }

    #[test]
    fn test_failing_machine_report() {
        let raw = telemetry(&[
            ("tool_wear", json!(230)),
            ("process_temperature", json!(322.0)),
            ("air_temperature", json!(300.0)),
        ]);
        let report = engine(0.92, true).predict("M-9", &raw).unwrap();

        assert_eq!(report.risk, RiskLevel::Critical);
        assert!((report.score - 8.0).abs() < 1e-4);
        assert_eq!(report.probability.critical, 0.92);
        assert_eq!(report.probability.low, 0.1);
        assert!(report.explanation.contains("critical condition"));

        // Worn tool past 200 min: (230-200)/100
        assert_eq!(report.failure_types.twf, 0.3);
        // 22 K differential saturates heat dissipation
        assert_eq!(report.failure_types.hdf, 1.0);

        // Wear is top-ranked and worn, so its impact is negative
        let wear = &report.shap_features[0];
        assert_eq!(wear.feature, "Tool wear min");
        assert!(wear.impact < 0.0);

        // Wear shows up in the responsibility mapping tied to TWF
        let worn = report
            .feature_responsibilities
            .iter()
            .find(|r| r.feature == "Tool wear min")
            .expect("tool wear responsibility");
        assert!(worn.responsible_for.iter().any(|l| l.probability == 0.3));
    }

    #[test]
    fn test_report_is_idempotent_apart_from_timestamp() {
        let raw = telemetry(&[("torque", json!(35.0))]);
        let engine = engine(0.4, false);

        let a = engine.predict("M-2", &raw).unwrap();
        let b = engine.predict("M-2", &raw).unwrap();

        assert_eq!(a.score, b.score);
        assert_eq!(a.risk, b.risk);
        assert_eq!(a.explanation, b.explanation);
        assert_eq!(a.failure_types, b.failure_types);
        assert_eq!(
            serde_json::to_value(&a.shap_features).unwrap(),
            serde_json::to_value(&b.shap_features).unwrap()
        );
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let engine = PredictionEngine::new(dataset_schema(), Box::new(FailingClassifier));
        let result = engine.predict("M-3", &HashMap::new());
        assert!(matches!(result, Err(InferenceError::Session(_))));
    }

    #[test]
    fn test_wire_format_field_names() {
        let report = engine(0.05, false)
            .predict("M-1", &HashMap::new())
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("score").is_some());
        assert_eq!(json["risk"], "low");
        assert!(json.get("shapFeatures").is_some());
        assert!(json.get("failureTypes").is_some());
        assert!(json.get("featureResponsibilities").is_some());
        assert_eq!(json["modelVersion"], "1.0.0");
        assert!(json.get("failureProbability").is_some());
        assert!(json.get("failurePredicted").is_some());
        assert!(json["failureTypes"].get("TWF").is_some());
        assert!(json["failureTypes"].get("RNF").is_some());

        let first = &json["shapFeatures"][0];
        assert!(first.get("shapValue").is_some());
        assert!(first.get("impact").is_some());
    }
}
