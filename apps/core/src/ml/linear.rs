//! Multinomial logistic regression trained by stochastic gradient descent.
//!
//! Log loss, balanced class weights, seeded shuffling and tolerance-based
//! early stopping. Inference reads plain weight vectors, so a trained model
//! is safe to share across threads without synchronization.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vectorizer::SparseVector;
use crate::error::AppError;

/// SGD hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgdOptions {
    /// Hard cap on training epochs.
    pub max_epochs: usize,
    /// Early-stop tolerance on the epoch loss.
    pub tolerance: f32,
    /// Epochs without sufficient improvement before stopping.
    pub patience: usize,
    /// Base learning rate, decayed per epoch.
    pub learning_rate: f32,
    /// L2 regularization strength.
    pub l2_penalty: f32,
    /// Seed for shuffling, for reproducible fits.
    pub seed: u64,
}

impl Default for SgdOptions {
    fn default() -> Self {
        Self {
            max_epochs: 1200,
            tolerance: 1e-3,
            patience: 5,
            learning_rate: 0.5,
            l2_penalty: 1e-4,
            seed: 42,
        }
    }
}

/// Trained softmax classifier over sparse TF-IDF features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    classes: Vec<String>,
    n_features: usize,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl SoftmaxClassifier {
    /// Fit on pre-vectorized samples. `targets` index into `classes`.
    ///
    /// Class weights are balanced: n / (k * count_c), so rare moods pull
    /// their weight against the majority class.
    pub fn train(
        samples: &[SparseVector],
        targets: &[usize],
        classes: Vec<String>,
        n_features: usize,
        options: &SgdOptions,
    ) -> Result<Self, AppError> {
        if samples.is_empty() || samples.len() != targets.len() {
            return Err(AppError::Dataset(
                "Training requires a non-empty, aligned sample/target set".to_string(),
            ));
        }
        if classes.is_empty() {
            return Err(AppError::Dataset("No classes to train on".to_string()));
        }
        if let Some(&bad) = targets.iter().find(|&&t| t >= classes.len()) {
            return Err(AppError::Dataset(format!(
                "Target index {} out of range for {} classes",
                bad,
                classes.len()
            )));
        }

        let n_classes = classes.len();
        let n_samples = samples.len();

        let mut class_counts = vec![0usize; n_classes];
        for &target in targets {
            class_counts[target] += 1;
        }
        let class_weights: Vec<f32> = class_counts
            .iter()
            .map(|&count| {
                if count == 0 {
                    0.0
                } else {
                    n_samples as f32 / (n_classes as f32 * count as f32)
                }
            })
            .collect();

        let mut model = Self {
            classes,
            n_features,
            weights: vec![vec![0.0; n_features]; n_classes],
            bias: vec![0.0; n_classes],
        };

        let mut rng = StdRng::seed_from_u64(options.seed);
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut best_loss = f32::INFINITY;
        let mut stalled_epochs = 0usize;

        for epoch in 0..options.max_epochs {
            order.shuffle(&mut rng);
            let eta = options.learning_rate / (1.0 + epoch as f32 * 0.01);
            let mut epoch_loss = 0.0f32;
            let mut weight_total = 0.0f32;

            for &sample_idx in &order {
                let features = &samples[sample_idx];
                let target = targets[sample_idx];
                let sample_weight = class_weights[target];

                let probabilities = model.predict_proba(features);
                epoch_loss -= sample_weight * probabilities[target].max(1e-12).ln();
                weight_total += sample_weight;

                for class in 0..n_classes {
                    let gradient =
                        probabilities[class] - if class == target { 1.0 } else { 0.0 };
                    let step = eta * sample_weight;
                    model.bias[class] -= step * gradient;
                    let row = &mut model.weights[class];
                    for &(idx, value) in features {
                        // L2 shrink applied lazily on touched features only.
                        let current = row[idx];
                        row[idx] = current - step * (gradient * value + options.l2_penalty * current);
                    }
                }
            }

            let mean_loss = if weight_total > 0.0 {
                epoch_loss / weight_total
            } else {
                0.0
            };

            if mean_loss < best_loss - options.tolerance {
                best_loss = mean_loss;
                stalled_epochs = 0;
            } else {
                stalled_epochs += 1;
                if stalled_epochs >= options.patience {
                    debug!(epoch, mean_loss, "SGD converged, stopping early");
                    break;
                }
            }
        }

        Ok(model)
    }

    /// Softmax probabilities over all classes, in class-index order.
    pub fn predict_proba(&self, features: &SparseVector) -> Vec<f32> {
        let mut scores = self.bias.clone();
        for (class, row) in self.weights.iter().enumerate() {
            for &(idx, value) in features {
                scores[class] += row[idx] * value;
            }
        }

        // Stable softmax.
        let max_score = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mut total = 0.0f32;
        for score in &mut scores {
            *score = (*score - max_score).exp();
            total += *score;
        }
        for score in &mut scores {
            *score /= total;
        }
        scores
    }

    /// Predicted class index and its probability. Ties resolve to the lowest
    /// class index, deterministically.
    pub fn predict(&self, features: &SparseVector) -> (usize, f32) {
        let probabilities = self.predict_proba(features);
        let mut best = 0usize;
        for (idx, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = idx;
            }
        }
        (best, probabilities[best])
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
