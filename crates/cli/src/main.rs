use api_shared::PredictRes;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use symptomatic_core::service::train_and_save;
use symptomatic_core::{
    ArtifactStore, CoreConfig, DiseaseCatalogue, DiseasePredictor, TrainingParams,
    DEFAULT_DATASET_PATH, DEFAULT_MODEL_DIR,
};
use symptomatic_types::SymptomText;

#[derive(Parser)]
#[command(name = "symptomatic")]
#[command(about = "Symptomatic disease prediction CLI")]
struct Cli {
    /// Directory holding the model artifacts
    #[arg(long, global = true, default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model, print the evaluation report and save the artifacts
    Train {
        /// CSV dataset with symptom columns and a Disease column
        #[arg(long, default_value = DEFAULT_DATASET_PATH)]
        dataset: PathBuf,
        /// Number of trees in the forest
        #[arg(long)]
        estimators: Option<usize>,
        /// Seed for the split and the forest
        #[arg(long)]
        seed: Option<u64>,
        /// Maximum tree depth (unlimited when omitted)
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// List the symptoms the saved model recognises
    Symptoms,
    /// List the disease catalogue
    Diseases,
    /// Predict diseases from a free-text description using the saved model
    Predict {
        /// Free-text symptom description
        text: String,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_predictor(model_dir: PathBuf) -> Result<DiseasePredictor, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(
        model_dir,
        PathBuf::from(DEFAULT_DATASET_PATH),
        TrainingParams::default(),
    )?;
    let store = ArtifactStore::new(&cfg);
    let model = store.load()?.ok_or_else(|| {
        format!(
            "no model artifacts in {}; run 'symptomatic train' first",
            store.model_dir().display()
        )
    })?;
    Ok(DiseasePredictor::new(model, DiseaseCatalogue::builtin())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptomatic_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train {
            dataset,
            estimators,
            seed,
            max_depth,
        }) => {
            let defaults = TrainingParams::default();
            let params = TrainingParams {
                n_estimators: estimators.unwrap_or(defaults.n_estimators),
                seed: seed.unwrap_or(defaults.seed),
                max_depth,
                ..defaults
            };
            let cfg = CoreConfig::new(cli.model_dir, dataset, params)?;
            let (_, report) = train_and_save(&cfg, &DiseaseCatalogue::builtin())?;
            println!(
                "Model trained with accuracy: {:.2} ({} training rows, {} held out)",
                report.accuracy, report.n_train, report.n_test
            );
            println!();
            print!("{}", report.report);
        }
        Some(Commands::Symptoms) => {
            let predictor = load_predictor(cli.model_dir)?;
            for symptom in predictor.symptoms() {
                println!("{}", symptom);
            }
        }
        Some(Commands::Diseases) => {
            for (name, info) in DiseaseCatalogue::builtin().iter() {
                println!("{} [{}]: {}", name, info.severity, info.description);
            }
        }
        Some(Commands::Predict { text, json }) => {
            let predictor = load_predictor(cli.model_dir)?;
            let text = SymptomText::new(text)?;
            let outcome = predictor.predict_from_text(&text)?;

            if json {
                let res = PredictRes::from(outcome);
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else if let Some(message) = outcome.message {
                println!("{}", message);
            } else {
                println!("Symptoms found: {}", outcome.symptoms_found.join(", "));
                for p in outcome.predictions {
                    println!(
                        "{:>5.1}%  {} [{}]\n        {}",
                        p.probability * 100.0,
                        p.name,
                        p.severity,
                        p.advice
                    );
                }
            }
        }
        None => {
            println!("Use 'symptomatic --help' for commands");
        }
    }

    Ok(())
}
