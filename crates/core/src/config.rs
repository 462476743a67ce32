//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables.

use crate::constants::{
    DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_N_ESTIMATORS, DEFAULT_SEED, ENCODER_FILENAME,
    MODEL_FILENAME, TEST_FRACTION, VOCABULARY_FILENAME,
};
use crate::{PredictorError, PredictorResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Hyper-parameters for the train/test split and the random forest.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            test_fraction: TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainingParams {
    /// Checks the parameters are usable before any training work starts.
    pub fn validate(&self) -> PredictorResult<()> {
        if self.n_estimators == 0 {
            return Err(PredictorError::InvalidConfig(
                "n_estimators must be at least 1".into(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(PredictorError::InvalidConfig(
                "min_samples_split must be at least 2".into(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(PredictorError::InvalidConfig(
                "max_depth must be at least 1 when set".into(),
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PredictorError::InvalidConfig(
                "test_fraction must lie strictly between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_dir: PathBuf,
    dataset_path: PathBuf,
    training: TrainingParams,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        model_dir: PathBuf,
        dataset_path: PathBuf,
        training: TrainingParams,
    ) -> PredictorResult<Self> {
        if model_dir.as_os_str().is_empty() {
            return Err(PredictorError::InvalidConfig(
                "model directory cannot be empty".into(),
            ));
        }
        if dataset_path.as_os_str().is_empty() {
            return Err(PredictorError::InvalidConfig(
                "dataset path cannot be empty".into(),
            ));
        }
        training.validate()?;

        Ok(Self {
            model_dir,
            dataset_path,
            training,
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn training(&self) -> &TrainingParams {
        &self.training
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILENAME)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.model_dir.join(ENCODER_FILENAME)
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.model_dir.join(VOCABULARY_FILENAME)
    }
}

/// Parse an optional environment value into `T`.
///
/// If `value` is `None` or empty/whitespace, returns `Ok(None)` so the caller can apply its
/// default. `name` is only used in the error message.
pub fn parse_env_value<T>(name: &str, value: Option<String>) -> PredictorResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| PredictorError::InvalidConfig(format!("{name}='{v}': {e}")))
        })
        .transpose()
}

/// Returns the trimmed environment value, or `default` when it is unset or empty/whitespace.
pub fn env_value_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Build `TrainingParams` from optional raw environment values, falling back to defaults.
pub fn training_params_from_env_values(
    n_estimators: Option<String>,
    seed: Option<String>,
    max_depth: Option<String>,
) -> PredictorResult<TrainingParams> {
    let defaults = TrainingParams::default();
    let params = TrainingParams {
        n_estimators: parse_env_value("RF_N_ESTIMATORS", n_estimators)?
            .unwrap_or(defaults.n_estimators),
        seed: parse_env_value("RF_SEED", seed)?.unwrap_or(defaults.seed),
        max_depth: parse_env_value("RF_MAX_DEPTH", max_depth)?,
        ..defaults
    };
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_DATASET_PATH, DEFAULT_MODEL_DIR};

    #[test]
    fn test_empty_env_values_use_defaults() {
        let params =
            training_params_from_env_values(None, Some("  ".into()), Some(String::new())).unwrap();
        assert_eq!(params, TrainingParams::default());
    }

    #[test]
    fn test_empty_path_env_values_use_defaults() {
        assert_eq!(env_value_or(None, DEFAULT_MODEL_DIR), DEFAULT_MODEL_DIR);
        assert_eq!(env_value_or(Some(String::new()), DEFAULT_MODEL_DIR), DEFAULT_MODEL_DIR);
        assert_eq!(
            env_value_or(Some("  ".into()), DEFAULT_DATASET_PATH),
            DEFAULT_DATASET_PATH
        );
        assert_eq!(env_value_or(Some(" models ".into()), DEFAULT_MODEL_DIR), "models");

        let cfg = CoreConfig::new(
            PathBuf::from(env_value_or(Some(String::new()), DEFAULT_MODEL_DIR)),
            PathBuf::from(env_value_or(Some(String::new()), DEFAULT_DATASET_PATH)),
            TrainingParams::default(),
        );
        assert!(cfg.is_ok());
    }

    #[test]
    fn test_env_values_override_defaults() {
        let params =
            training_params_from_env_values(Some("10".into()), Some("7".into()), Some("4".into()))
                .unwrap();
        assert_eq!(params.n_estimators, 10);
        assert_eq!(params.seed, 7);
        assert_eq!(params.max_depth, Some(4));
    }

    #[test]
    fn test_unparsable_env_value_is_rejected() {
        let result = training_params_from_env_values(Some("lots".into()), None, None);
        match result {
            Err(PredictorError::InvalidConfig(msg)) => assert!(msg.contains("RF_N_ESTIMATORS")),
            other => panic!("Expected InvalidConfig error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_estimators_rejected() {
        assert!(training_params_from_env_values(Some("0".into()), None, None).is_err());
    }

    #[test]
    fn test_artifact_paths_live_in_model_dir() {
        let cfg = CoreConfig::new(
            PathBuf::from("models"),
            PathBuf::from("data.csv"),
            TrainingParams::default(),
        )
        .unwrap();
        assert_eq!(cfg.model_path(), Path::new("models").join(MODEL_FILENAME));
        assert_eq!(cfg.encoder_path(), Path::new("models").join(ENCODER_FILENAME));
        assert_eq!(
            cfg.vocabulary_path(),
            Path::new("models").join(VOCABULARY_FILENAME)
        );
    }

    #[test]
    fn test_empty_model_dir_rejected() {
        let result = CoreConfig::new(
            PathBuf::new(),
            PathBuf::from("data.csv"),
            TrainingParams::default(),
        );
        assert!(result.is_err());
    }
}
