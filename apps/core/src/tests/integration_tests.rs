//! Integration Tests
//!
//! Startup-shaped scenarios: train, persist artifacts, reload them the way
//! the server boots, run preflight, and drive the router end to end.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::connect_info::MockConnectInfo;
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use tempfile::TempDir;

use crate::feedback::FeedbackRecorder;
use crate::fs_manager::PathManager;
use crate::ml::{artifacts, trainer, TrainOptions};
use crate::pipeline::{MoodClassifier, MoodEngine};
use crate::polarity::PolarityScorer;
use crate::preflight;
use crate::rate_limiter::RateLimiter;
use crate::server::{app, AppState};
use crate::tests::pipeline_tests::sample_dataset;
use crate::tests::server_tests::post_json;

/// Train on the sample corpus and persist the pair under `paths`.
fn save_trained_model(paths: &PathManager) {
    let dataset = sample_dataset();
    let options = TrainOptions {
        max_epochs: 400,
        ..TrainOptions::default()
    };
    let (vectorizer, classifier, _) = trainer::train(&dataset, &options).unwrap();
    artifacts::save(&paths.models_dir(), &vectorizer, &classifier).unwrap();
}

/// Bring up the router the way startup does: artifacts reloaded from disk,
/// state assembled around them.
fn booted_router(root: &Path) -> (Router, PathManager) {
    let paths = PathManager::new(root);
    paths.init().unwrap();
    save_trained_model(&paths);

    let model = MoodClassifier::from_artifacts(&paths.models_dir()).unwrap();
    let state = AppState {
        engine: Arc::new(MoodEngine::new(Arc::new(model))),
        recorder: Arc::new(FeedbackRecorder::new(paths.feedback_log_path())),
        scorer: Arc::new(PolarityScorer::new()),
        limiter: Arc::new(Mutex::new(RateLimiter::new(100, Duration::from_secs(60)))),
        max_message_len: 2000,
    };
    let router = app(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9001))));
    (router, paths)
}

#[cfg(test)]
mod startup_tests {
    use super::*;

    #[test]
    fn test_preflight_passes_with_trained_artifacts() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::new(dir.path());
        paths.init().unwrap();
        save_trained_model(&paths);

        let report = preflight::run_preflight_checks(&paths);
        assert!(report.all_passed, "summary: {}", report.summary);
        assert!(report.ready_to_start);
        assert!(!report.needs_training);
    }

    #[test]
    fn test_preflight_requires_training_on_an_empty_root() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::new(dir.path());

        let report = preflight::run_preflight_checks(&paths);
        assert!(report.needs_training);
        assert!(!report.ready_to_start);
        assert_eq!(report.summary, "Model artifacts missing. Training required.");

        // Directories get created on the fly; only the artifacts are missing.
        let directories = report.checks.iter().find(|c| c.name == "directories");
        assert!(directories.map(|c| c.passed).unwrap_or(false));
        let model_check = report.checks.iter().find(|c| c.name == "model_artifacts");
        assert!(!model_check.map(|c| c.passed).unwrap_or(true));
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn test_exam_failure_resolves_to_a_negative_mood() {
        let dir = TempDir::new().unwrap();
        let (router, _paths) = booted_router(dir.path());

        let payload = json!({
            "message": "I failed my exam and I feel terrible",
            "mode": "Therapy",
        });
        let (status, value) = post_json(router, "/chat", payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["outcome"], "classified");
        let mood = value["mood"].as_str().unwrap();
        assert!(
            ["angry", "fear", "happy", "neutral", "sad"].contains(&mood),
            "unexpected mood: {}",
            mood
        );
        assert_eq!(value["broad_mood"], "negative");
        let confidence = value["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!(!value["reply"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_correlates_with_an_earlier_prediction() {
        let dir = TempDir::new().unwrap();
        let (router, paths) = booted_router(dir.path());

        let chat = json!({"message": "i am so sad about all of this", "mode": "Therapy"});
        let (status, report) = post_json(router.clone(), "/chat", chat).await;
        assert_eq!(status, StatusCode::OK);
        let id = report["id"].as_str().unwrap().to_string();

        let feedback = json!({
            "text": "that reply missed the mark",
            "predicted": report["mood"],
            "actual": "angry",
            "prediction_id": id,
        });
        let (status, _) = post_json(router, "/feedback", feedback).await;
        assert_eq!(status, StatusCode::OK);

        let log = std::fs::read_to_string(paths.feedback_log_path()).unwrap();
        assert!(log.contains(&id), "log did not reference the prediction id");
        assert!(log.contains("that reply missed the mark"));
    }
}
