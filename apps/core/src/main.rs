//! MoodChat Core server entry point.
//!
//! Startup order matters: load or train the model first (fail fast when
//! neither is possible), then preflight everything, then serve.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;
use tracing::{info, warn};

use moodchat_core::config::Config;
use moodchat_core::error::AppError;
use moodchat_core::feedback::FeedbackRecorder;
use moodchat_core::fs_manager::PathManager;
use moodchat_core::ml::{artifacts, trainer, Dataset, TrainOptions};
use moodchat_core::pipeline::{MoodClassifier, MoodEngine};
use moodchat_core::polarity::PolarityScorer;
use moodchat_core::preflight;
use moodchat_core::rate_limiter::RateLimiter;
use moodchat_core::server::{app, AppState};
use moodchat_core::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init("moodchat-core", "info").context("telemetry init failed")?;

    let config = Config::from_env().context("configuration error")?;
    info!(data_dir = %config.data_dir.display(), "Starting MoodChat Core");

    let paths = PathManager::new(config.data_dir.clone());
    paths.init().context("cannot create data directories")?;

    // Load the trained pair, or train one when allowed. No model, no serving.
    let model = bootstrap_model(&config, &paths).context("model bootstrap failed")?;
    let engine = Arc::new(MoodEngine::new(Arc::new(model)));

    let report = preflight::run_preflight_checks(&paths);
    if !report.ready_to_start {
        anyhow::bail!("preflight failed: {}", report.summary);
    }

    let state = AppState {
        engine,
        recorder: Arc::new(FeedbackRecorder::new(paths.feedback_log_path())),
        scorer: Arc::new(PolarityScorer::new()),
        limiter: Arc::new(Mutex::new(RateLimiter::new(
            config.rate_limit,
            Duration::from_secs(config.rate_window_secs),
        ))),
        max_message_len: config.max_message_len,
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {bind_addr}"))?;
    info!("Listening on http://{bind_addr}");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Load artifacts from disk, or train from the dataset (falling back to the
/// built-in samples) when `train_if_missing` allows it.
fn bootstrap_model(config: &Config, paths: &PathManager) -> Result<MoodClassifier, AppError> {
    let models_dir = paths.models_dir();

    if artifacts::exists(&models_dir) {
        info!(dir = %models_dir.display(), "Loading model artifacts from disk");
        return MoodClassifier::from_artifacts(&models_dir);
    }

    if !config.train_if_missing {
        return Err(AppError::ModelUnavailable(format!(
            "No artifacts under {} and startup training is disabled",
            models_dir.display()
        )));
    }

    let dataset_path = config
        .dataset_path
        .clone()
        .unwrap_or_else(|| paths.default_dataset_path());
    let dataset = match Dataset::load_csv(&dataset_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!(error = %e, "Dataset unavailable, training on built-in samples");
            Dataset::fallback_samples()
        }
    };

    info!(samples = dataset.len(), "Training mood model at startup");
    let (vectorizer, classifier, report) = trainer::train(&dataset, &TrainOptions::default())?;
    report.log();
    artifacts::save(&models_dir, &vectorizer, &classifier)?;

    MoodClassifier::new(vectorizer, classifier)
}
