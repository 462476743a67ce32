//! Symptom vocabulary and free-text symptom extraction.
//!
//! Matching is plain substring containment of each token's readable form (underscores replaced
//! by spaces) in the lower-cased text. There is no word-boundary check, so `ache` would match
//! inside `headache`. Callers rely on this exact behaviour.

use crate::{PredictorError, PredictorResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Turns a vocabulary token into its human-readable form.
pub fn readable(token: &str) -> String {
    token.replace('_', " ")
}

/// Ordered, unique symptom tokens. Position is the feature index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomVocabulary {
    tokens: Vec<String>,
    readable: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Builds a vocabulary from tokens in feature order.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::ArtifactMismatch` if the list is empty or contains an empty or
    /// duplicated token.
    pub fn new(tokens: Vec<String>) -> PredictorResult<Self> {
        if tokens.is_empty() {
            return Err(PredictorError::ArtifactMismatch(
                "symptom vocabulary is empty".into(),
            ));
        }
        let mut index = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if token.trim().is_empty() || index.insert(token.clone(), i).is_some() {
                return Err(PredictorError::ArtifactMismatch(format!(
                    "symptom vocabulary has an empty or duplicate token: '{token}'"
                )));
            }
        }
        let readable = tokens.iter().map(|t| readable(t)).collect();
        Ok(Self {
            tokens,
            readable,
            index,
        })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Human-readable forms in vocabulary order.
    pub fn readable_tokens(&self) -> &[String] {
        &self.readable
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Indices of the tokens whose readable form occurs in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<usize> {
        let text = text.to_lowercase();
        self.readable
            .iter()
            .enumerate()
            .filter(|(_, symptom)| text.contains(symptom.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Dense 0/1 feature vector with a 1.0 at each given index.
    pub fn vectorize(&self, indices: &[usize]) -> PredictorResult<Vec<f64>> {
        let mut vector = vec![0.0; self.tokens.len()];
        for &i in indices {
            let slot = vector.get_mut(i).ok_or(PredictorError::FeatureLength {
                expected: self.tokens.len(),
                found: i + 1,
            })?;
            *slot = 1.0;
        }
        Ok(vector)
    }
}

impl TryFrom<Vec<String>> for SymptomVocabulary {
    type Error = PredictorError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl From<SymptomVocabulary> for Vec<String> {
    fn from(vocabulary: SymptomVocabulary) -> Self {
        vocabulary.tokens
    }
}
