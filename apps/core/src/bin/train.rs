//! Offline training binary.
//!
//! Trains the vectorizer/classifier pair from a labeled CSV and writes the
//! artifacts the server loads at startup. Unlike startup training, this
//! refuses to run without a real dataset.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;

use moodchat_core::fs_manager::PathManager;
use moodchat_core::ml::{artifacts, trainer, Dataset, TrainOptions};
use moodchat_core::telemetry;

#[derive(Parser)]
#[command(author, version, about = "Train the mood model and save its artifacts")]
struct Cli {
    /// Labeled CSV with a text column and a mood column
    #[arg(long, env = "MOODCHAT_DATASET")]
    dataset: Option<PathBuf>,

    /// Root directory for data/ and models/
    #[arg(long, env = "MOODCHAT_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.15)]
    test_fraction: f32,

    /// Epoch cap for the SGD fit
    #[arg(long, default_value_t = 1200)]
    max_epochs: usize,

    /// Seed for the split and shuffle
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::init("moodchat-train", "info").context("telemetry init failed")?;

    let paths = PathManager::new(cli.data_dir.clone());
    let dataset_path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| paths.default_dataset_path());

    info!(path = %dataset_path.display(), "Loading training dataset");
    let dataset = Dataset::load_csv(&dataset_path)
        .with_context(|| format!("cannot load dataset from {}", dataset_path.display()))?;
    info!(
        samples = dataset.len(),
        moods = dataset.label_set().len(),
        "Dataset loaded"
    );

    let options = TrainOptions {
        test_fraction: cli.test_fraction,
        max_epochs: cli.max_epochs,
        seed: cli.seed,
    };
    let (vectorizer, classifier, report) = trainer::train(&dataset, &options)?;
    report.log();

    let models_dir = paths.models_dir();
    artifacts::save(&models_dir, &vectorizer, &classifier)?;
    info!(dir = %models_dir.display(), "Training complete, artifacts saved");
    info!("Restart the server to load the new model");

    Ok(())
}
