//! On-disk persistence for the trained vectorizer/classifier pair.
//!
//! The two artifacts always travel together: a vectorizer from one run and
//! a classifier from another disagree on feature indices, so `load` hands
//! back both or neither.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::linear::SoftmaxClassifier;
use super::vectorizer::TfidfVectorizer;
use crate::error::AppError;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Bumped whenever the serialized layout changes shape.
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoredVectorizer {
    version: u32,
    vectorizer: TfidfVectorizer,
}

#[derive(Serialize, Deserialize)]
struct StoredClassifier {
    version: u32,
    classifier: SoftmaxClassifier,
}

/// True when both artifact files are present in `dir`.
pub fn exists(dir: &Path) -> bool {
    dir.join(VECTORIZER_FILE).is_file() && dir.join(CLASSIFIER_FILE).is_file()
}

/// Persist the trained pair under `dir`, creating the directory if needed.
pub fn save(
    dir: &Path,
    vectorizer: &TfidfVectorizer,
    classifier: &SoftmaxClassifier,
) -> Result<(), AppError> {
    fs::create_dir_all(dir)?;

    let vec_path = dir.join(VECTORIZER_FILE);
    let vec_file = BufWriter::new(File::create(&vec_path)?);
    serde_json::to_writer(
        vec_file,
        &StoredVectorizer {
            version: ARTIFACT_VERSION,
            vectorizer: vectorizer.clone(),
        },
    )?;

    let clf_path = dir.join(CLASSIFIER_FILE);
    let clf_file = BufWriter::new(File::create(&clf_path)?);
    serde_json::to_writer(
        clf_file,
        &StoredClassifier {
            version: ARTIFACT_VERSION,
            classifier: classifier.clone(),
        },
    )?;

    info!(dir = %dir.display(), "Saved model artifacts");
    Ok(())
}

/// Load the persisted pair from `dir`.
///
/// Any failure here means the service has no model to serve with, so every
/// error path collapses into `AppError::ModelUnavailable` with the offending
/// path in the message.
pub fn load(dir: &Path) -> Result<(TfidfVectorizer, SoftmaxClassifier), AppError> {
    let vec_path = dir.join(VECTORIZER_FILE);
    let stored_vec: StoredVectorizer = read_json(&vec_path)?;
    if stored_vec.version != ARTIFACT_VERSION {
        return Err(AppError::ModelUnavailable(format!(
            "{}: artifact version {} (expected {})",
            vec_path.display(),
            stored_vec.version,
            ARTIFACT_VERSION
        )));
    }

    let clf_path = dir.join(CLASSIFIER_FILE);
    let stored_clf: StoredClassifier = read_json(&clf_path)?;
    if stored_clf.version != ARTIFACT_VERSION {
        return Err(AppError::ModelUnavailable(format!(
            "{}: artifact version {} (expected {})",
            clf_path.display(),
            stored_clf.version,
            ARTIFACT_VERSION
        )));
    }

    Ok((stored_vec.vectorizer, stored_clf.classifier))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::ModelUnavailable(format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::ModelUnavailable(format!("{}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::dataset::Dataset;
    use crate::ml::trainer::{self, TrainOptions};

    fn trained_pair() -> (TfidfVectorizer, SoftmaxClassifier) {
        let dataset = Dataset::fallback_samples();
        let (vectorizer, classifier, _) = trainer::train(
            &dataset,
            &TrainOptions {
                max_epochs: 50,
                ..TrainOptions::default()
            },
        )
        .unwrap();
        (vectorizer, classifier)
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (vectorizer, classifier) = trained_pair();

        save(dir.path(), &vectorizer, &classifier).unwrap();
        assert!(exists(dir.path()));

        let (loaded_vec, loaded_clf) = load(dir.path()).unwrap();
        assert_eq!(loaded_vec.n_features(), vectorizer.n_features());
        assert_eq!(loaded_clf.classes(), classifier.classes());

        let features = loaded_vec.transform("i am so happy today");
        let (idx, confidence) = loaded_clf.predict(&features);
        assert!(idx < loaded_clf.n_classes());
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn test_load_missing_dir_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(!exists(&missing));
        let err = load(&missing).unwrap_err();
        assert!(matches!(err, AppError::ModelUnavailable(_)));
    }

    #[test]
    fn test_load_corrupt_artifact_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let (vectorizer, classifier) = trained_pair();
        save(dir.path(), &vectorizer, &classifier).unwrap();

        std::fs::write(dir.path().join(CLASSIFIER_FILE), "not json at all").unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::ModelUnavailable(_)));
    }
}
