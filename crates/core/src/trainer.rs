//! Offline training: split, fit, evaluate.

use crate::config::TrainingParams;
use crate::dataset::Dataset;
use crate::encoder::LabelEncoder;
use crate::forest::RandomForest;
use crate::metrics::ClassificationReport;
use crate::model::TrainedModel;
use crate::vocabulary::SymptomVocabulary;
use crate::{PredictorError, PredictorResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Outcome of a training run, measured on the held-out rows.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    pub accuracy: f64,
    pub report: ClassificationReport,
}

/// Shuffles `0..n` with a seeded RNG and returns `(train, test)` index sets.
///
/// The test set takes the first `ceil(n * test_fraction)` shuffled indices.
///
/// # Errors
///
/// Returns `PredictorError::InsufficientData` if either side would be empty.
pub fn train_test_split(
    n: usize,
    test_fraction: f64,
    seed: u64,
) -> PredictorResult<(Vec<usize>, Vec<usize>)> {
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n < 2 || n_test == 0 || n_test >= n {
        return Err(PredictorError::InsufficientData {
            needed: 2,
            found: n,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let train = indices.split_off(n_test);
    Ok((train, indices))
}

fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

/// Fits the encoder and forest on a dataset and evaluates on a held-out split.
pub fn train(
    dataset: &Dataset,
    params: &TrainingParams,
) -> PredictorResult<(TrainedModel, TrainingReport)> {
    params.validate()?;

    let (train_idx, test_idx) = train_test_split(dataset.len(), params.test_fraction, params.seed)?;
    let vocabulary = SymptomVocabulary::new(dataset.feature_names().to_vec())?;
    let (encoder, y) = LabelEncoder::fit_transform(dataset.labels())?;

    tracing::info!(
        "training on {} rows ({} held out), {} symptoms, {} diseases",
        train_idx.len(),
        test_idx.len(),
        vocabulary.len(),
        encoder.len()
    );

    let x_train = select(dataset.features(), &train_idx);
    let y_train = select(&y, &train_idx);
    let forest = RandomForest::fit(&x_train, &y_train, encoder.len(), params)?;

    let y_test = select(&y, &test_idx);
    let y_pred = test_idx
        .iter()
        .map(|&i| forest.predict(&dataset.features()[i]))
        .collect::<PredictorResult<Vec<usize>>>()?;

    let report = ClassificationReport::new(encoder.classes(), &y_test, &y_pred);
    let training_report = TrainingReport {
        n_train: train_idx.len(),
        n_test: test_idx.len(),
        accuracy: report.accuracy,
        report,
    };

    tracing::info!("model trained with accuracy: {:.2}", training_report.accuracy);

    let model = TrainedModel::new(forest, encoder, vocabulary)?;
    Ok((model, training_report))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 8);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let (train, test) = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
    }

    #[test]
    fn test_split_needs_two_rows() {
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(PredictorError::InsufficientData { found: 1, .. })
        ));
    }

    #[test]
    fn test_training_is_reproducible() {
        let dataset = fixtures::dataset();
        let (_, first) = train(&dataset, &fixtures::params()).unwrap();
        let (_, second) = train(&dataset, &fixtures::params()).unwrap();

        assert_eq!(first.accuracy, second.accuracy);
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_training_report_shape() {
        let dataset = fixtures::dataset();
        let (model, report) = train(&dataset, &fixtures::params()).unwrap();

        assert_eq!(report.n_train + report.n_test, dataset.len());
        assert!((0.0..=1.0).contains(&report.accuracy));
        assert_eq!(report.report.classes.len(), 5);
        assert_eq!(model.vocabulary().tokens(), dataset.feature_names());
        assert_eq!(
            model.encoder().classes(),
            &["COVID-19", "Common Cold", "Gastroenteritis", "Influenza", "Migraine"]
        );
    }

    #[test]
    fn test_single_row_dataset_rejected() {
        let dataset = Dataset::new(
            vec!["fever".into()],
            vec![vec![1.0]],
            vec!["Influenza".into()],
        )
        .unwrap();
        assert!(matches!(
            train(&dataset, &fixtures::params()),
            Err(PredictorError::InsufficientData { .. })
        ));
    }
}
