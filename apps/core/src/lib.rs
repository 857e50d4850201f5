//! # MoodChat Core
//!
//! Backend for a mood-aware chat service. One message flows through the
//! pipeline: emoji and emoticons are rewritten into sentiment words, a
//! TF-IDF + linear classifier predicts a fine-grained mood, the taxonomy
//! rolls it up to a broad sentiment, and a canned reply is picked for the
//! caller's conversation mode. User feedback is appended to a CSV log for
//! the next training run.

pub mod config;
pub mod error;
pub mod feedback;
pub mod fs_manager;
pub mod ml;
pub mod models;
pub mod pipeline;
pub mod polarity;
pub mod preflight;
pub mod rate_limiter;
pub mod server;
pub mod telemetry;

#[cfg(test)]
mod tests;

// Re-export the types most callers need
pub use error::AppError;
pub use pipeline::{MoodEngine, MoodReport};
pub use server::{app, AppState};
