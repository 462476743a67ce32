//! Bijective mapping between disease names and classifier class indices.

use crate::{PredictorError, PredictorResult};
use serde::{Deserialize, Serialize};

/// Maps disease labels to dense class indices.
///
/// Classes are the sorted unique labels seen at fit time, so a label's index is its position in
/// lexicographic order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits an encoder on the given labels.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> PredictorResult<Self> {
        if labels.is_empty() {
            return Err(PredictorError::InvalidInput(
                "cannot fit a label encoder without labels".into(),
            ));
        }
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        Ok(Self { classes })
    }

    /// Fits the encoder and encodes the same labels in one pass.
    pub fn fit_transform<S: AsRef<str>>(labels: &[S]) -> PredictorResult<(Self, Vec<usize>)> {
        let encoder = Self::fit(labels)?;
        let encoded = encoder.transform(labels)?;
        Ok((encoder, encoded))
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> PredictorResult<Vec<usize>> {
        labels.iter().map(|l| self.index_of(l.as_ref())).collect()
    }

    pub fn index_of(&self, label: &str) -> PredictorResult<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| PredictorError::UnknownLabel(label.to_string()))
    }

    pub fn inverse_transform(&self, index: usize) -> PredictorResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(PredictorError::UnknownClass(index))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Checks classes are strictly sorted. Guards encoders read back from disk.
    pub(crate) fn validate(&self) -> PredictorResult<()> {
        if self.classes.is_empty() {
            return Err(PredictorError::ArtifactMismatch(
                "label encoder has no classes".into(),
            ));
        }
        if self.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PredictorError::ArtifactMismatch(
                "label encoder classes are not unique and sorted".into(),
            ));
        }
        Ok(())
    }
}
