//! On-disk model artifacts.
//!
//! A trained model is stored as three flat JSON files inside the model directory: the forest,
//! the label encoder and the ordered symptom vocabulary. The set is only considered present when
//! all three files exist.

use crate::config::CoreConfig;
use crate::encoder::LabelEncoder;
use crate::forest::RandomForest;
use crate::model::TrainedModel;
use crate::vocabulary::SymptomVocabulary;
use crate::{PredictorError, PredictorResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and writes the three model artifact files.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    model_dir: PathBuf,
    model_path: PathBuf,
    encoder_path: PathBuf,
    vocabulary_path: PathBuf,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> PredictorResult<()> {
    let json = serde_json::to_string(value).map_err(PredictorError::Serialization)?;
    fs::write(path, json).map_err(PredictorError::ArtifactWrite)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PredictorResult<T> {
    let contents = fs::read_to_string(path).map_err(PredictorError::ArtifactRead)?;
    serde_json::from_str(&contents).map_err(PredictorError::Deserialization)
}

impl ArtifactStore {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            model_dir: cfg.model_dir().to_path_buf(),
            model_path: cfg.model_path(),
            encoder_path: cfg.encoder_path(),
            vocabulary_path: cfg.vocabulary_path(),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// True only when every artifact file exists.
    pub fn exists(&self) -> bool {
        self.model_path.is_file() && self.encoder_path.is_file() && self.vocabulary_path.is_file()
    }

    /// Writes all three artifacts, creating the model directory if needed.
    pub fn save(&self, model: &TrainedModel) -> PredictorResult<()> {
        fs::create_dir_all(&self.model_dir).map_err(PredictorError::ModelDirCreation)?;
        write_json(&self.model_path, model.forest())?;
        write_json(&self.encoder_path, model.encoder())?;
        write_json(&self.vocabulary_path, model.vocabulary())?;

        tracing::info!("saved model artifacts to {}", self.model_dir.display());
        Ok(())
    }

    /// Loads the model if all artifacts are present.
    ///
    /// # Returns
    /// * `Ok(Some(model))` - all three files were read and agree with each other
    /// * `Ok(None)` - at least one artifact file is missing
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or parsed, or if the parts are not
    /// index-aligned. A corrupt artifact set is never silently replaced.
    pub fn load(&self) -> PredictorResult<Option<TrainedModel>> {
        if !self.exists() {
            tracing::debug!("no complete artifact set in {}", self.model_dir.display());
            return Ok(None);
        }

        let forest: RandomForest = read_json(&self.model_path)?;
        let encoder: LabelEncoder = read_json(&self.encoder_path)?;
        let vocabulary: SymptomVocabulary = read_json(&self.vocabulary_path)?;

        TrainedModel::new(forest, encoder, vocabulary).map(Some)
    }
}
