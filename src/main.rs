use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use symptomatic_core::{
    config::{env_value_or, training_params_from_env_values},
    CoreConfig, DiseaseCatalogue, ModelSource, PredictionService, DEFAULT_DATASET_PATH,
    DEFAULT_MODEL_DIR,
};

const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Main entry point for the Symptomatic service
///
/// Loads the persisted model (training one first if no artifacts exist) and serves the REST API.
/// A missing dataset or corrupt artifacts abort startup.
///
/// # Environment Variables
/// - `SYMPTOMATIC_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `MODEL_DIR`: Directory holding the model artifacts (default: ".")
/// - `DATASET_PATH`: Training dataset used when no model exists (default: "data/disease_symptom_data.csv")
/// - `RF_N_ESTIMATORS`, `RF_SEED`, `RF_MAX_DEPTH`: Forest hyper-parameters
///
/// Empty values count as unset.
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, model loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptomatic_run=info".parse()?)
                .add_directive("symptomatic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = env_value_or(std::env::var("SYMPTOMATIC_REST_ADDR").ok(), DEFAULT_REST_ADDR);
    let model_dir = env_value_or(std::env::var("MODEL_DIR").ok(), DEFAULT_MODEL_DIR);
    let dataset_path = env_value_or(std::env::var("DATASET_PATH").ok(), DEFAULT_DATASET_PATH);

    let training = training_params_from_env_values(
        std::env::var("RF_N_ESTIMATORS").ok(),
        std::env::var("RF_SEED").ok(),
        std::env::var("RF_MAX_DEPTH").ok(),
    )?;
    let cfg = CoreConfig::new(
        PathBuf::from(model_dir),
        PathBuf::from(dataset_path),
        training,
    )?;

    let (service, source) = PredictionService::load_or_train(&cfg, DiseaseCatalogue::builtin())?;
    match source {
        ModelSource::Loaded => tracing::info!("++ Loaded existing disease prediction model"),
        ModelSource::Trained(report) => tracing::info!(
            "++ Trained new disease prediction model with accuracy: {:.2}",
            report.accuracy
        ),
    }

    let app = api_rest::router(AppState { service });

    tracing::info!("++ Starting Symptomatic REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
