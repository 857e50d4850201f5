//! Split/fit/evaluate orchestration for the mood model.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::dataset::{train_test_split, Dataset};
use super::linear::{SgdOptions, SoftmaxClassifier};
use super::vectorizer::{TfidfVectorizer, VectorizerOptions};
use crate::error::AppError;

/// Training run options.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Fraction of rows held out for the evaluation report.
    pub test_fraction: f32,
    /// Epoch cap for the SGD fit.
    pub max_epochs: usize,
    /// Seed for the split and the SGD shuffle.
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.15,
            max_epochs: 1200,
            seed: 42,
        }
    }
}

/// Per-class evaluation metrics on the held-out rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub label: String,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub support: usize,
}

/// Evaluation summary produced after a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub accuracy: f32,
    pub train_size: usize,
    pub test_size: usize,
    pub classes: Vec<ClassReport>,
}

impl TrainReport {
    /// Emit the classification report through tracing, one line per class.
    pub fn log(&self) {
        info!(
            train_size = self.train_size,
            test_size = self.test_size,
            accuracy = self.accuracy,
            "Classification report on held-out set"
        );
        for class in &self.classes {
            info!(
                label = %class.label,
                precision = class.precision,
                recall = class.recall,
                f1 = class.f1,
                support = class.support,
                "class metrics"
            );
        }
    }
}

/// Train the vectorizer/classifier pair and evaluate on a held-out split.
///
/// Classes come out of the label set in sorted order, so the class indices
/// are stable for a given dataset.
pub fn train(
    dataset: &Dataset,
    options: &TrainOptions,
) -> Result<(TfidfVectorizer, SoftmaxClassifier, TrainReport), AppError> {
    if dataset.len() < 2 {
        return Err(AppError::Dataset(
            "Not enough samples to train a model".to_string(),
        ));
    }

    let classes = dataset.label_set();
    if classes.len() < 2 {
        return Err(AppError::Dataset(
            "Training requires at least two distinct mood labels".to_string(),
        ));
    }

    let class_index = |label: &str| -> usize {
        // label_set() is sorted, so this always finds a slot.
        classes.binary_search_by(|c| c.as_str().cmp(label)).unwrap_or(0)
    };

    let (train_set, test_set) = train_test_split(dataset, options.test_fraction, options.seed);
    info!(
        train = train_set.len(),
        test = test_set.len(),
        classes = classes.len(),
        "Fitting TF-IDF vectorizer and SGD classifier"
    );

    let vectorizer = TfidfVectorizer::fit(&train_set.texts, VectorizerOptions::default());

    let samples: Vec<_> = train_set
        .texts
        .iter()
        .map(|text| vectorizer.transform(text))
        .collect();
    let targets: Vec<usize> = train_set
        .labels
        .iter()
        .map(|label| class_index(label.as_str()))
        .collect();

    let sgd_options = SgdOptions {
        max_epochs: options.max_epochs,
        seed: options.seed,
        ..SgdOptions::default()
    };
    let classifier = SoftmaxClassifier::train(
        &samples,
        &targets,
        classes.clone(),
        vectorizer.n_features(),
        &sgd_options,
    )?;

    let report = evaluate(&vectorizer, &classifier, &test_set, &classes, train_set.len());
    Ok((vectorizer, classifier, report))
}

fn evaluate(
    vectorizer: &TfidfVectorizer,
    classifier: &SoftmaxClassifier,
    test_set: &Dataset,
    classes: &[String],
    train_size: usize,
) -> TrainReport {
    let n_classes = classes.len();
    let mut true_positives = vec![0usize; n_classes];
    let mut false_positives = vec![0usize; n_classes];
    let mut false_negatives = vec![0usize; n_classes];
    let mut support = vec![0usize; n_classes];
    let mut correct = 0usize;

    for (text, label) in test_set.texts.iter().zip(&test_set.labels) {
        let actual = classes
            .binary_search_by(|c| c.as_str().cmp(label.as_str()))
            .unwrap_or(0);
        support[actual] += 1;

        let features = vectorizer.transform(text);
        let (predicted, _) = classifier.predict(&features);

        if predicted == actual {
            correct += 1;
            true_positives[actual] += 1;
        } else {
            false_positives[predicted] += 1;
            false_negatives[actual] += 1;
        }
    }

    // Zero-division guarded: absent classes report 0.0, not NaN.
    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f32 / den as f32 };

    let class_reports = classes
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let precision = ratio(true_positives[idx], true_positives[idx] + false_positives[idx]);
            let recall = ratio(true_positives[idx], true_positives[idx] + false_negatives[idx]);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            ClassReport {
                label: label.clone(),
                precision,
                recall,
                f1,
                support: support[idx],
            }
        })
        .collect();

    TrainReport {
        accuracy: ratio(correct, test_set.len()),
        train_size,
        test_size: test_set.len(),
        classes: class_reports,
    }
}
