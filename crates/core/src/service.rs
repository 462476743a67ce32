//! Load-or-train bootstrap and the shared prediction service.

use crate::artifacts::ArtifactStore;
use crate::catalogue::DiseaseCatalogue;
use crate::config::CoreConfig;
use crate::dataset::Dataset;
use crate::model::TrainedModel;
use crate::predictor::{DiseasePredictor, PredictionOutcome};
use crate::trainer::{self, TrainingReport};
use crate::PredictorResult;
use std::sync::Arc;
use symptomatic_types::SymptomText;

/// How the service obtained its model.
#[derive(Clone, Debug)]
pub enum ModelSource {
    Loaded,
    Trained(TrainingReport),
}

/// Trains from the configured dataset and persists the artifacts.
///
/// Nothing is written unless `catalogue` describes every disease in the dataset.
pub fn train_and_save(
    cfg: &CoreConfig,
    catalogue: &DiseaseCatalogue,
) -> PredictorResult<(TrainedModel, TrainingReport)> {
    tracing::info!("training new disease prediction model from {}", cfg.dataset_path().display());
    let dataset = Dataset::from_csv_path(cfg.dataset_path())?;
    let (model, report) = trainer::train(&dataset, cfg.training())?;
    catalogue.ensure_covers(model.encoder().classes())?;
    ArtifactStore::new(cfg).save(&model)?;
    Ok((model, report))
}

/// Immutable prediction service shared by request handlers.
///
/// Cloning is cheap; every clone reads the same predictor.
#[derive(Clone, Debug)]
pub struct PredictionService {
    predictor: Arc<DiseasePredictor>,
}

impl PredictionService {
    pub fn new(predictor: DiseasePredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }

    /// Loads persisted artifacts, or trains and persists a model when none exist.
    ///
    /// # Errors
    /// Returns an error if existing artifacts are corrupt or misaligned, if the dataset cannot be
    /// loaded, or if the catalogue does not describe every disease the model can output.
    pub fn load_or_train(
        cfg: &CoreConfig,
        catalogue: DiseaseCatalogue,
    ) -> PredictorResult<(Self, ModelSource)> {
        let (model, source) = match ArtifactStore::new(cfg).load()? {
            Some(model) => {
                tracing::info!("loaded existing disease prediction model");
                (model, ModelSource::Loaded)
            }
            None => {
                let (model, report) = train_and_save(cfg, &catalogue)?;
                (model, ModelSource::Trained(report))
            }
        };

        let predictor = DiseasePredictor::new(model, catalogue)?;
        Ok((Self::new(predictor), source))
    }

    pub fn predictor(&self) -> &DiseasePredictor {
        &self.predictor
    }

    pub fn symptoms(&self) -> &[String] {
        self.predictor.symptoms()
    }

    pub fn predict(&self, text: &SymptomText) -> PredictorResult<PredictionOutcome> {
        self.predictor.predict_from_text(text)
    }
}
