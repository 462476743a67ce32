//! Constants used throughout the Symptomatic core crate.
//!
//! This module contains artifact filenames, training defaults and prediction limits to ensure
//! consistency across the codebase and make maintenance easier.

/// Filename of the persisted random forest.
pub const MODEL_FILENAME: &str = "trained_model.json";

/// Filename of the persisted label encoder.
pub const ENCODER_FILENAME: &str = "label_encoder.json";

/// Filename of the persisted ordered symptom vocabulary.
pub const VOCABULARY_FILENAME: &str = "symptom_vocabulary.json";

/// Default directory for model artifacts when no explicit directory is configured.
pub const DEFAULT_MODEL_DIR: &str = ".";

/// Default path of the training dataset, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/disease_symptom_data.csv";

/// Name of the label column in the training dataset.
pub const LABEL_COLUMN: &str = "Disease";

/// Fraction of the dataset held out for evaluation.
pub const TEST_FRACTION: f64 = 0.2;

/// Default seed for the train/test split and the forest.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of trees in the forest.
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Minimum number of samples a node needs before it may be split.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Classes at or below this probability are dropped from a prediction.
pub const PROBABILITY_THRESHOLD: f64 = 0.05;

/// Maximum number of predictions returned for one description.
pub const MAX_PREDICTIONS: usize = 3;

/// Message returned when no known symptom occurs in the description.
pub const NO_SYMPTOMS_MESSAGE: &str =
    "No recognizable symptoms found. Please provide more details about how you're feeling.";
