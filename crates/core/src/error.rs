#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read dataset: {0}")]
    DatasetRead(csv::Error),
    #[error("dataset has no '{0}' column")]
    MissingLabelColumn(String),
    #[error("dataset has no symptom columns")]
    NoFeatureColumns,
    #[error("dataset contains an empty or duplicate symptom column: '{0}'")]
    InvalidFeatureColumn(String),
    #[error("dataset row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset row {row}, column '{column}': '{value}' is not a number")]
    InvalidFeatureValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("dataset needs at least {needed} rows, found {found}")]
    InsufficientData { needed: usize, found: usize },

    #[error("failed to create model directory: {0}")]
    ModelDirCreation(std::io::Error),
    #[error("failed to write model artifact: {0}")]
    ArtifactWrite(std::io::Error),
    #[error("failed to read model artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to serialize model artifact: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize model artifact: {0}")]
    Deserialization(serde_json::Error),

    #[error("model artifacts are inconsistent: {0}")]
    ArtifactMismatch(String),
    #[error("feature vector has {found} entries, model expects {expected}")]
    FeatureLength { expected: usize, found: usize },
    #[error("class index {0} is outside the label encoder")]
    UnknownClass(usize),
    #[error("unknown disease label: {0}")]
    UnknownLabel(String),
    #[error("no catalogue entry for disease: {0}")]
    MissingMetadata(String),
}

pub type PredictorResult<T> = std::result::Result<T, PredictorError>;
