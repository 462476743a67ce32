//! Tabular symptom/disease dataset loading.
//!
//! The dataset is a CSV file with a header row. One column (`Disease`) carries the label, every
//! other column is a symptom indicator whose name becomes a vocabulary token.

use crate::constants::LABEL_COLUMN;
use crate::{PredictorError, PredictorResult};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// One row per historical case: feature values in column order plus the disease label.
#[derive(Clone, Debug)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Dataset {
    /// Builds a dataset from already-parsed parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature names are empty or duplicated, or if the rows do not line
    /// up with the feature names and labels.
    pub fn new(
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<String>,
    ) -> PredictorResult<Self> {
        if feature_names.is_empty() {
            return Err(PredictorError::NoFeatureColumns);
        }
        let mut seen = HashSet::new();
        for name in &feature_names {
            if name.trim().is_empty() || !seen.insert(name.as_str()) {
                return Err(PredictorError::InvalidFeatureColumn(name.clone()));
            }
        }
        if features.len() != labels.len() {
            return Err(PredictorError::InvalidInput(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        for (i, row) in features.iter().enumerate() {
            if row.len() != feature_names.len() {
                return Err(PredictorError::RaggedRow {
                    row: i + 1,
                    expected: feature_names.len() + 1,
                    found: row.len() + 1,
                });
            }
        }

        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    /// Loads a dataset from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> PredictorResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(PredictorError::DatasetRead)?;
        Self::from_csv(reader)
    }

    /// Loads a dataset from any CSV source, e.g. an in-memory buffer.
    pub fn from_csv_reader<R: Read>(rdr: R) -> PredictorResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> PredictorResult<Self> {
        let headers = reader.headers().map_err(PredictorError::DatasetRead)?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| PredictorError::MissingLabelColumn(LABEL_COLUMN.into()))?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(PredictorError::DatasetRead)?;
            let row_number = row_idx + 1;
            if record.len() != headers.len() {
                return Err(PredictorError::RaggedRow {
                    row: row_number,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            let mut row = Vec::with_capacity(feature_names.len());
            for (col_idx, field) in record.iter().enumerate() {
                if col_idx == label_idx {
                    continue;
                }
                let value = field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| PredictorError::InvalidFeatureValue {
                        row: row_number,
                        column: headers.get(col_idx).unwrap_or_default().to_string(),
                        value: field.to_string(),
                    })?;
                row.push(value);
            }

            features.push(row);
            labels.push(record.get(label_idx).unwrap_or_default().to_string());
        }

        Self::new(feature_names, features, labels)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_column_may_appear_anywhere() {
        let csv = "fever,Disease,cough\n1,Influenza,0\n0,Common Cold,1\n";
        let ds = Dataset::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(ds.feature_names(), &["fever".to_string(), "cough".to_string()]);
        assert_eq!(ds.features(), &[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(ds.labels(), &["Influenza".to_string(), "Common Cold".to_string()]);
    }

    #[test]
    fn test_missing_label_column() {
        let csv = "fever,cough\n1,0\n";
        let result = Dataset::from_csv_reader(csv.as_bytes());
        assert!(matches!(result, Err(PredictorError::MissingLabelColumn(_))));
    }

    #[test]
    fn test_non_numeric_feature_rejected() {
        let csv = "fever,Disease\nyes,Influenza\n";
        match Dataset::from_csv_reader(csv.as_bytes()) {
            Err(PredictorError::InvalidFeatureValue { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "fever");
                assert_eq!(value, "yes");
            }
            other => panic!("Expected InvalidFeatureValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_rejected() {
        let csv = "fever,cough,Disease\n1,Influenza\n";
        let result = Dataset::from_csv_reader(csv.as_bytes());
        assert!(matches!(result, Err(PredictorError::RaggedRow { .. })));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let csv = "fever,fever,Disease\n1,1,Influenza\n";
        let result = Dataset::from_csv_reader(csv.as_bytes());
        assert!(matches!(result, Err(PredictorError::InvalidFeatureColumn(_))));
    }

    #[test]
    fn test_label_only_dataset_rejected() {
        let csv = "Disease\nInfluenza\n";
        let result = Dataset::from_csv_reader(csv.as_bytes());
        assert!(matches!(result, Err(PredictorError::NoFeatureColumns)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = Dataset::from_csv_path(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(PredictorError::DatasetRead(_))));
    }
}
