//! Preflight Check System
//!
//! This module verifies every component the service depends on before it
//! starts serving: directories, model artifacts, taxonomy coverage, the
//! reply book, and the feedback log. No assumptions - everything is checked.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use tracing::{info, warn};

use crate::fs_manager::PathManager;
use crate::pipeline::classifier::{MoodClassifier, MoodModel};
use crate::pipeline::replies::{self, GENERIC_REPLIES, NEED_WORDS_REPLIES, RECOVERY_REPLIES};
use crate::pipeline::taxonomy::{self, MoodFamily};

const ALL_FAMILIES: [MoodFamily; 7] = [
    MoodFamily::Happy,
    MoodFamily::Sad,
    MoodFamily::Angry,
    MoodFamily::Neutral,
    MoodFamily::Fear,
    MoodFamily::Surprise,
    MoodFamily::Disgust,
];

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub ready_to_start: bool,
    pub needs_training: bool,
    pub summary: String,
}

/// Performs all preflight checks and returns a comprehensive report
pub fn run_preflight_checks(paths: &PathManager) -> PreflightReport {
    info!("╔══════════════════════════════════════════════════════╗");
    info!("║  🔍 RUNNING PREFLIGHT CHECKS                         ║");
    info!("╚══════════════════════════════════════════════════════╝");

    let mut checks = Vec::new();

    // 1. Check directories
    checks.push(check_directories(paths));

    // 2. Check model artifacts load into a usable pair
    let (artifacts_check, model) = check_model_artifacts(paths);
    let artifacts_ok = artifacts_check.passed;
    checks.push(artifacts_check);

    // 3. Check taxonomy coverage (only meaningful with a loaded model)
    if let Some(model) = &model {
        checks.push(check_taxonomy_coverage(model));
    } else {
        checks.push(CheckResult::fail(
            "taxonomy_coverage",
            "Skipped - model not loaded",
            None,
        ));
    }

    // 4. Check reply book
    checks.push(check_reply_book());

    // 5. Check feedback log is writable
    checks.push(check_feedback_log(paths));

    // Calculate results
    let all_passed = checks.iter().all(|c| c.passed);
    let critical_passed = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);

    // No artifacts means a training run is needed before serving
    let needs_training = !artifacts_ok;

    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else if needs_training {
        "Model artifacts missing. Training required.".to_string()
    } else if critical_passed {
        "Some non-critical checks failed. System can start with warnings.".to_string()
    } else {
        "Critical checks failed. System cannot start.".to_string()
    };

    // Log results
    for check in &checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("      Details: {}", details);
            }
        }
    }

    info!("Summary: {}", summary);

    PreflightReport {
        all_passed,
        checks,
        ready_to_start: critical_passed && !needs_training,
        needs_training,
        summary,
    }
}

fn is_critical_check(name: &str) -> bool {
    matches!(name, "directories" | "model_artifacts")
}

// --- Individual Checks ---

fn check_directories(paths: &PathManager) -> CheckResult {
    let dirs = [("data", paths.data_dir()), ("models", paths.models_dir())];

    let mut missing = Vec::new();
    let mut created = Vec::new();

    for (name, path) in &dirs {
        if !path.exists() {
            match std::fs::create_dir_all(path) {
                Ok(_) => created.push(*name),
                Err(e) => missing.push(format!("{}: {}", name, e)),
            }
        }
    }

    if missing.is_empty() {
        if created.is_empty() {
            CheckResult::pass("directories", "All directories exist")
        } else {
            CheckResult::pass(
                "directories",
                &format!("Created missing directories: {}", created.join(", ")),
            )
        }
    } else {
        CheckResult::fail(
            "directories",
            "Failed to create directories",
            Some(missing.join(", ")),
        )
    }
}

fn check_model_artifacts(paths: &PathManager) -> (CheckResult, Option<MoodClassifier>) {
    let models_dir = paths.models_dir();

    match MoodClassifier::from_artifacts(&models_dir) {
        Ok(model) => {
            let labels = model.labels().len();
            let check = CheckResult::pass(
                "model_artifacts",
                &format!("Model OK ({} mood labels)", labels),
            );
            (check, Some(model))
        }
        Err(e) => {
            let check = CheckResult::fail(
                "model_artifacts",
                "Cannot load model artifacts",
                Some(e.to_string()),
            );
            (check, None)
        }
    }
}

fn check_taxonomy_coverage(model: &MoodClassifier) -> CheckResult {
    let unmapped: Vec<String> = model
        .labels()
        .iter()
        .filter(|label| taxonomy::family_of(label.as_str()).is_none())
        .cloned()
        .collect();

    if unmapped.is_empty() {
        CheckResult::pass(
            "taxonomy_coverage",
            &format!("All {} labels resolve to a reply family", model.labels().len()),
        )
    } else {
        // Unmapped labels still serve (generic reply, neutral bucket), so
        // this is a warning rather than a startup blocker.
        CheckResult::fail(
            "taxonomy_coverage",
            "Some labels fall outside the taxonomy",
            Some(format!("Unmapped: {}", unmapped.join(", "))),
        )
    }
}

fn check_reply_book() -> CheckResult {
    let empty_families: Vec<&str> = ALL_FAMILIES
        .iter()
        .filter(|family| replies::mood_replies(**family).is_empty())
        .map(|family| family.label())
        .collect();

    let mut problems = Vec::new();
    if !empty_families.is_empty() {
        problems.push(format!("families without replies: {}", empty_families.join(", ")));
    }
    if NEED_WORDS_REPLIES.is_empty() {
        problems.push("need-words prompts missing".to_string());
    }
    if RECOVERY_REPLIES.is_empty() {
        problems.push("recovery replies missing".to_string());
    }
    if GENERIC_REPLIES.is_empty() {
        problems.push("generic replies missing".to_string());
    }

    if problems.is_empty() {
        CheckResult::pass(
            "reply_book",
            &format!("Reply book covers all {} families", ALL_FAMILIES.len()),
        )
    } else {
        CheckResult::fail("reply_book", "Reply book has gaps", Some(problems.join("; ")))
    }
}

fn check_feedback_log(paths: &PathManager) -> CheckResult {
    let path = paths.feedback_log_path();

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return CheckResult::fail(
                "feedback_log",
                "Cannot create feedback log directory",
                Some(e.to_string()),
            );
        }
    }

    match OpenOptions::new().append(true).create(true).open(&path) {
        Ok(_) => CheckResult::pass(
            "feedback_log",
            &format!("Feedback log writable at {:?}", path),
        ),
        Err(e) => CheckResult::fail(
            "feedback_log",
            "Feedback log is not writable",
            Some(e.to_string()),
        ),
    }
}
