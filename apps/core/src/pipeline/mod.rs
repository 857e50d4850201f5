//! # Mood Pipeline
//!
//! Turns one raw chat message into a mood report: sanitize the text,
//! classify it, roll the label up to a broad sentiment, pick a reply.
//!
//! ## Components
//! - `normalizer`: Emoji/emoticon rewriting into sentiment words
//! - `classifier`: Adapter around the trained TF-IDF + linear model
//! - `taxonomy`: Fine label → reply family → broad category mapping
//! - `replies`: Canned reply book with three-tier fallback
//! - `report`: Output data structure
//! - `engine`: Main orchestrator

pub mod classifier;
pub mod engine;
pub mod normalizer;
pub mod replies;
pub mod report;
pub mod taxonomy;

// Re-export main types for convenience
pub use classifier::{MoodClassifier, MoodModel};
pub use engine::MoodEngine;
pub use normalizer::normalize;
pub use report::{MoodReport, Outcome};
pub use taxonomy::{classify_broad, BroadMood, MoodFamily};
