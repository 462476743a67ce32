//! # Symptomatic Core
//!
//! Core logic for the Symptomatic disease-prediction service:
//! - Dataset loading and validation
//! - Random forest training, evaluation and persistence
//! - Substring-based symptom extraction and ranked prediction
//!
//! **No API concerns**: HTTP servers and request/response shapes belong in `api-rest` and
//! `api-shared`.

pub mod artifacts;
pub mod catalogue;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod service;
pub mod trainer;
pub mod vocabulary;

pub use artifacts::ArtifactStore;
pub use catalogue::{DiseaseCatalogue, DiseaseInfo};
pub use config::{CoreConfig, TrainingParams};
pub use constants::{DEFAULT_DATASET_PATH, DEFAULT_MODEL_DIR};
pub use error::{PredictorError, PredictorResult};
pub use predictor::{DiseasePrediction, DiseasePredictor, PredictionOutcome};
pub use service::{ModelSource, PredictionService};
pub use trainer::TrainingReport;
