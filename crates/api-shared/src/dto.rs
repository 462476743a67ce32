//! JSON request and response bodies.

use serde::{Deserialize, Serialize};
use symptomatic_core::{DiseasePrediction, PredictionOutcome};
use symptomatic_types::Severity;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomsRes {
    /// Human-readable symptom names in vocabulary order
    pub symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    /// Free-text description of how the patient feels
    #[schema(example = "I have a headache and fever")]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    pub name: String,
    /// Class probability in [0, 1]
    pub probability: f64,
    pub severity: Severity,
    pub description: String,
    pub advice: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    /// At most three diseases, most probable first
    pub predictions: Vec<Prediction>,
    pub symptoms_found: Vec<String>,
    /// Only present when no symptom was recognised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

impl ErrorRes {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<DiseasePrediction> for Prediction {
    fn from(p: DiseasePrediction) -> Self {
        Self {
            name: p.name,
            probability: p.probability,
            severity: p.severity,
            description: p.description,
            advice: p.advice,
        }
    }
}

impl From<PredictionOutcome> for PredictRes {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            predictions: outcome.predictions.into_iter().map(Prediction::from).collect(),
            symptoms_found: outcome.symptoms_found,
            message: outcome.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_omitted_when_absent() {
        let res = PredictRes {
            predictions: vec![],
            symptoms_found: vec!["fever".into()],
            message: None,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_prediction_wire_shape() {
        let res = PredictRes::from(PredictionOutcome {
            predictions: vec![DiseasePrediction {
                name: "Migraine".into(),
                probability: 0.5,
                severity: Severity::Medium,
                description: "d".into(),
                advice: "a".into(),
            }],
            symptoms_found: vec!["headache".into()],
            message: None,
        });
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "predictions": [{
                    "name": "Migraine",
                    "probability": 0.5,
                    "severity": "medium",
                    "description": "d",
                    "advice": "a"
                }],
                "symptoms_found": ["headache"]
            })
        );
    }
}
