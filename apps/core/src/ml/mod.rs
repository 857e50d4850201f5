//! # ML Module
//!
//! Training-side machinery for the mood classifier.
//!
//! ## Components
//! - `vectorizer`: TF-IDF text vectorization (unigrams + bigrams)
//! - `linear`: multinomial logistic regression trained by SGD
//! - `dataset`: CSV loading with column auto-detection, built-in fallback samples
//! - `trainer`: split/fit/evaluate orchestration
//! - `artifacts`: serialized vectorizer/classifier pair on disk

pub mod artifacts;
pub mod dataset;
pub mod linear;
pub mod trainer;
pub mod vectorizer;

pub use dataset::Dataset;
pub use linear::{SgdOptions, SoftmaxClassifier};
pub use trainer::{TrainOptions, TrainReport};
pub use vectorizer::{SparseVector, TfidfVectorizer};
