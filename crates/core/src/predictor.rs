//! Request-time prediction: extract, vectorize, classify, enrich, rank, truncate.

use crate::catalogue::DiseaseCatalogue;
use crate::constants::{MAX_PREDICTIONS, NO_SYMPTOMS_MESSAGE, PROBABILITY_THRESHOLD};
use crate::model::TrainedModel;
use crate::PredictorResult;
use symptomatic_types::{Severity, SymptomText};

/// One ranked disease with its catalogue metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseasePrediction {
    pub name: String,
    pub probability: f64,
    pub severity: Severity,
    pub description: String,
    pub advice: String,
}

/// Result of predicting from one description.
///
/// `message` is only set when no symptom was recognised, in which case both lists are empty.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionOutcome {
    pub predictions: Vec<DiseasePrediction>,
    pub symptoms_found: Vec<String>,
    pub message: Option<String>,
}

impl PredictionOutcome {
    fn no_symptoms() -> Self {
        Self {
            predictions: Vec::new(),
            symptoms_found: Vec::new(),
            message: Some(NO_SYMPTOMS_MESSAGE.to_string()),
        }
    }
}

/// A trained model paired with the catalogue describing its classes.
#[derive(Clone, Debug)]
pub struct DiseasePredictor {
    model: TrainedModel,
    catalogue: DiseaseCatalogue,
}

impl DiseasePredictor {
    /// Pairs a model with a catalogue.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::MissingMetadata` naming the first class the catalogue does not
    /// describe.
    pub fn new(model: TrainedModel, catalogue: DiseaseCatalogue) -> PredictorResult<Self> {
        catalogue.ensure_covers(model.encoder().classes())?;
        Ok(Self { model, catalogue })
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn catalogue(&self) -> &DiseaseCatalogue {
        &self.catalogue
    }

    /// Human-readable symptom names in vocabulary order.
    pub fn symptoms(&self) -> &[String] {
        self.model.vocabulary().readable_tokens()
    }

    /// Vocabulary tokens mentioned in `text`, in vocabulary order.
    pub fn extract_symptoms(&self, text: &str) -> Vec<&str> {
        let vocabulary = self.model.vocabulary();
        vocabulary
            .extract(text)
            .into_iter()
            .map(|i| vocabulary.tokens()[i].as_str())
            .collect()
    }

    /// Runs the full pipeline for one description.
    pub fn predict_from_text(&self, text: &SymptomText) -> PredictorResult<PredictionOutcome> {
        let vocabulary = self.model.vocabulary();
        let found = vocabulary.extract(text.as_str());

        if found.is_empty() {
            tracing::debug!("no known symptoms in description");
            return Ok(PredictionOutcome::no_symptoms());
        }

        let features = vocabulary.vectorize(&found)?;
        let mut predictions = self
            .model
            .class_probabilities(&features)?
            .into_iter()
            .filter(|(_, p)| *p > PROBABILITY_THRESHOLD)
            .map(|(name, probability)| {
                let info = self.catalogue.get(name)?;
                Ok(DiseasePrediction {
                    name: name.to_string(),
                    probability,
                    severity: info.severity,
                    description: info.description.clone(),
                    advice: info.advice.clone(),
                })
            })
            .collect::<PredictorResult<Vec<_>>>()?;

        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        predictions.truncate(MAX_PREDICTIONS);

        let symptoms_found = found
            .iter()
            .map(|&i| vocabulary.readable_tokens()[i].clone())
            .collect();

        Ok(PredictionOutcome {
            predictions,
            symptoms_found,
            message: None,
        })
    }
}
