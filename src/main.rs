//! habitrisk - command-line entry point
//!
//! `fit` learns the preprocessing pipeline from a training CSV and saves it.
//! `predict` loads the fitted artifacts once and serves one survey record.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use habitrisk::config::{AppConfig, LogFormat, LoggingConfig};
use habitrisk::dataset::{read_csv_path, write_csv_path};
use habitrisk::model::{Classifier, LinearClassifier};
use habitrisk::predict::{PredictError, Predictor};
use habitrisk::preprocessing::{
    FittedPipeline, FittedTransformer, Pipeline, Resampler, Transformer,
};
use habitrisk::schema::{self, FieldError, SurveyRecord};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "habitrisk", version, about = "Obesity risk prediction from lifestyle survey answers")]
struct Cli {
    /// Configuration file (defaults to config/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit the preprocessing pipeline on a training CSV
    Fit {
        /// Training table with a header row of column names
        #[arg(long)]
        train: PathBuf,
        /// Where to write the fitted pipeline
        #[arg(long)]
        out: PathBuf,
        /// Balance the minority class of the transformed training table
        #[arg(long)]
        resample: bool,
        /// Resampling seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Where to write the resampled training table
        #[arg(long, requires = "resample")]
        resampled_out: Option<PathBuf>,
    },
    /// Predict the risk band of one survey record (JSON)
    Predict {
        /// Record file; read from stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    init_tracing(&config.logging)?;

    match cli.command {
        Command::Fit {
            train,
            out,
            resample,
            seed,
            resampled_out,
        } => {
            let resampler = resample.then(|| Resampler::new().with_seed(seed));
            fit(&train, &out, resampler, resampled_out.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Predict { input } => predict(&config, input.as_deref()),
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log filter")?;

    // stdout carries the JSON response; logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
    Ok(())
}

fn fit(
    train: &Path,
    out: &Path,
    resampler: Option<Resampler>,
    resampled_out: Option<&Path>,
) -> Result<()> {
    let frame = read_csv_path(train)
        .with_context(|| format!("Failed to read training table {}", train.display()))?;
    info!(path = %train.display(), rows = frame.n_rows(), columns = frame.n_cols(), "training table loaded");

    let (fitted, output) = Pipeline::standard()
        .fit_with_output(&frame)
        .context("Failed to fit pipeline")?;
    fitted
        .save_to_file(out)
        .with_context(|| format!("Failed to write pipeline to {}", out.display()))?;
    info!(path = %out.display(), steps = ?fitted.step_names(), "pipeline saved");

    let mut rows = output.n_rows();
    if let Some(resampler) = resampler {
        let balanced = resampler.fit_transform(&output).context("Failed to resample")?;
        rows = balanced.n_rows();
        if let Some(path) = resampled_out {
            write_csv_path(&balanced, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), rows, "resampled training table saved");
        }
    }

    let summary = json!({
        "steps": fitted.step_names(),
        "output_columns": fitted.output_columns(),
        "training_rows": rows,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_predictor(config: &AppConfig) -> Result<Predictor<LinearClassifier>> {
    let pipeline_path = &config.artifacts.pipeline_path;
    let pipeline = FittedPipeline::load_from_file(pipeline_path)
        .with_context(|| format!("Failed to load pipeline from {}", pipeline_path))?;
    info!(path = %pipeline_path, steps = ?pipeline.step_names(), "pipeline loaded");

    let model_path = &config.artifacts.model_path;
    let classifier = LinearClassifier::load_from_file(model_path)
        .with_context(|| format!("Failed to load classifier from {}", model_path))?;

    let expected = pipeline
        .output_columns()
        .iter()
        .filter(|c| c.as_str() != schema::TARGET)
        .count();
    if let Some(n) = classifier.n_features() {
        if n != expected {
            bail!(
                "Classifier expects {} features but the pipeline produces {}",
                n,
                expected
            );
        }
    }

    Ok(Predictor::new(pipeline, classifier)
        .with_placeholder_target(config.prediction.placeholder_target.clone())
        .with_vocabulary_policy(config.prediction.vocabulary_policy()))
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn reject(errors: &[FieldError]) -> ExitCode {
    let body = json!({ "status": "error", "errors": errors });
    println!("{}", body);
    ExitCode::from(2)
}

fn predict(config: &AppConfig, input: Option<&Path>) -> Result<ExitCode> {
    let predictor = load_predictor(config)?;
    let raw = read_input(input)?;

    let record: SurveyRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            return Ok(reject(&[FieldError {
                field: "request".to_string(),
                message: e.to_string(),
            }]))
        }
    };

    match predictor.predict(&record) {
        Ok(prediction) => {
            let body = json!({
                "status": "success",
                "data": {
                    "prediction": prediction.message(),
                    "class": prediction.class.label(),
                },
            });
            println!("{}", body);
            Ok(ExitCode::SUCCESS)
        }
        Err(PredictError::Validation(errors)) => Ok(reject(&errors)),
        Err(e) => Err(e).context("Prediction failed"),
    }
}
