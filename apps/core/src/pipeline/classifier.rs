//! Mood classifier adapter.
//!
//! Couples the TF-IDF vectorizer to the softmax classifier behind a narrow
//! trait, so the engine can run against a fake model in tests. The pair is
//! loaded once at startup and shared read-only for the process lifetime.

use std::path::Path;

use tracing::warn;

use crate::error::AppError;
use crate::ml::{artifacts, SoftmaxClassifier, TfidfVectorizer};

/// Read-only prediction interface the engine works against.
///
/// Implementations must be safe to call from many requests at once;
/// inference takes `&self` and never mutates.
pub trait MoodModel: Send + Sync {
    /// Labels this model can produce, in class-index order.
    fn labels(&self) -> &[String];

    /// Predict a mood label for normalized text, with the probability mass
    /// assigned to it when the model can produce one.
    fn predict(&self, text: &str) -> Result<(String, Option<f32>), AppError>;
}

/// Production model: TF-IDF features fed into the linear classifier.
#[derive(Debug)]
pub struct MoodClassifier {
    vectorizer: TfidfVectorizer,
    classifier: SoftmaxClassifier,
}

impl MoodClassifier {
    /// Pair a vectorizer with a classifier, verifying they were trained
    /// together. A feature-count mismatch means the artifacts are from
    /// different runs and predictions would be garbage.
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: SoftmaxClassifier,
    ) -> Result<Self, AppError> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(AppError::ModelUnavailable(format!(
                "Vectorizer and classifier disagree on feature count ({} vs {})",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load the trained pair persisted under `dir`.
    pub fn from_artifacts(dir: &Path) -> Result<Self, AppError> {
        let (vectorizer, classifier) = artifacts::load(dir)?;
        Self::new(vectorizer, classifier)
    }
}

impl MoodModel for MoodClassifier {
    fn labels(&self) -> &[String] {
        self.classifier.classes()
    }

    fn predict(&self, text: &str) -> Result<(String, Option<f32>), AppError> {
        // Text with no vocabulary hits still predicts: an all-zero feature
        // vector falls back to the bias term, the class prior.
        let features = self.vectorizer.transform(text);
        if features.is_empty() {
            warn!("No vocabulary hits for input; predicting from class priors");
        }
        let (index, confidence) = self.classifier.predict(&features);
        let label = self
            .classifier
            .classes()
            .get(index)
            .cloned()
            .ok_or_else(|| {
                AppError::Prediction(format!("Predicted class index {index} out of range"))
            })?;
        Ok((label, Some(confidence)))
    }
}
