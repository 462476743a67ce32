//! The trained model bundle: forest, label encoder and symptom vocabulary.

use crate::encoder::LabelEncoder;
use crate::forest::RandomForest;
use crate::vocabulary::SymptomVocabulary;
use crate::{PredictorError, PredictorResult};

/// Everything needed to turn a feature vector into named class probabilities.
///
/// The three parts are index-aligned: forest feature `i` is vocabulary token `i`, and forest
/// class `j` is encoder class `j`. [`TrainedModel::new`] enforces this.
#[derive(Clone, Debug)]
pub struct TrainedModel {
    forest: RandomForest,
    encoder: LabelEncoder,
    vocabulary: SymptomVocabulary,
}

impl TrainedModel {
    /// Bundles the parts after checking they line up.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::ArtifactMismatch` if the forest's feature or class count differs
    /// from the vocabulary or encoder, or if any part is structurally invalid.
    pub fn new(
        forest: RandomForest,
        encoder: LabelEncoder,
        vocabulary: SymptomVocabulary,
    ) -> PredictorResult<Self> {
        encoder.validate()?;
        forest.validate()?;

        if forest.n_features() != vocabulary.len() {
            return Err(PredictorError::ArtifactMismatch(format!(
                "forest expects {} features but vocabulary has {} symptoms",
                forest.n_features(),
                vocabulary.len()
            )));
        }
        if forest.n_classes() != encoder.len() {
            return Err(PredictorError::ArtifactMismatch(format!(
                "forest has {} classes but label encoder has {}",
                forest.n_classes(),
                encoder.len()
            )));
        }

        Ok(Self {
            forest,
            encoder,
            vocabulary,
        })
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    /// Class probabilities for a feature vector, paired with disease names, in encoder order.
    pub fn class_probabilities(&self, features: &[f64]) -> PredictorResult<Vec<(&str, f64)>> {
        let proba = self.forest.predict_proba(features)?;
        proba
            .into_iter()
            .enumerate()
            .map(|(i, p)| Ok((self.encoder.inverse_transform(i)?, p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingParams;

    fn forest(n_features: usize, n_classes: usize) -> RandomForest {
        let x: Vec<Vec<f64>> = (0..4)
            .map(|i| (0..n_features).map(|f| ((i + f) % 2) as f64).collect())
            .collect();
        let y: Vec<usize> = (0..4).map(|i| i % n_classes).collect();
        let params = TrainingParams {
            n_estimators: 2,
            ..TrainingParams::default()
        };
        RandomForest::fit(&x, &y, n_classes, &params).unwrap()
    }

    fn vocabulary(n: usize) -> SymptomVocabulary {
        SymptomVocabulary::new((0..n).map(|i| format!("symptom_{i}")).collect()).unwrap()
    }

    #[test]
    fn test_aligned_parts_accepted() {
        let encoder = LabelEncoder::fit(&["A", "B"]).unwrap();
        let model = TrainedModel::new(forest(3, 2), encoder, vocabulary(3)).unwrap();

        let probs = model.class_probabilities(&[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(probs.len(), 2);
        assert_eq!(probs[0].0, "A");
        assert_eq!(probs[1].0, "B");
    }

    #[test]
    fn test_vocabulary_length_mismatch_rejected() {
        let encoder = LabelEncoder::fit(&["A", "B"]).unwrap();
        let result = TrainedModel::new(forest(3, 2), encoder, vocabulary(4));
        assert!(matches!(result, Err(PredictorError::ArtifactMismatch(_))));
    }

    #[test]
    fn test_class_count_mismatch_rejected() {
        let encoder = LabelEncoder::fit(&["A", "B", "C"]).unwrap();
        let result = TrainedModel::new(forest(3, 2), encoder, vocabulary(3));
        assert!(matches!(result, Err(PredictorError::ArtifactMismatch(_))));
    }
}
