//! Pipeline engine: one message in, one mood report out.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::classifier::MoodModel;
use super::normalizer;
use super::replies;
use super::report::{MoodReport, Outcome};
use super::taxonomy::{self, BroadMood};
use crate::models::ConversationMode;

/// Runs normalize → predict → broad-map → reply for each message.
///
/// Holds the model behind an `Arc`, shared read-only across requests. The
/// engine itself carries no per-request state, so one instance serves every
/// connection concurrently.
pub struct MoodEngine {
    model: Arc<dyn MoodModel>,
}

impl MoodEngine {
    pub fn new(model: Arc<dyn MoodModel>) -> Self {
        Self { model }
    }

    /// The model handle, for health reporting and startup checks.
    pub fn model(&self) -> &Arc<dyn MoodModel> {
        &self.model
    }

    /// Process one message and produce a report.
    ///
    /// This never fails the request: an empty normalization short-circuits
    /// to a prompt for more words, and classifier trouble degrades to a
    /// recovery reply. Only the report's `outcome` tells them apart.
    pub fn respond(&self, message: &str, mode: ConversationMode) -> MoodReport {
        let start = Instant::now();
        let id = Uuid::new_v4().to_string();

        // 1. Rewrite emoji and emoticons into plain sentiment words.
        let normalized = normalizer::normalize(message);
        if normalized.is_empty() {
            debug!(request = %id, "No textual signal after normalization");
            return MoodReport {
                id,
                mood: None,
                broad_mood: BroadMood::Neutral,
                confidence: None,
                reply: replies::need_words_reply(),
                outcome: Outcome::NeedMoreText,
                processing_time_ms: start.elapsed().as_millis() as u64,
                timestamp: Utc::now(),
            };
        }

        // 2. Classify, recovering locally from any per-request failure.
        match self.model.predict(&normalized) {
            Ok((label, confidence)) => {
                // 3. Roll the fine label up and pick a reply for the mode.
                let broad = taxonomy::classify_broad(&label);
                let reply = replies::select_reply(&label, broad, mode);
                debug!(
                    request = %id,
                    mood = %label,
                    broad = %broad,
                    mode = %mode,
                    "Classified message"
                );
                MoodReport {
                    id,
                    mood: Some(label),
                    broad_mood: broad,
                    confidence,
                    reply,
                    outcome: Outcome::Classified,
                    processing_time_ms: start.elapsed().as_millis() as u64,
                    timestamp: Utc::now(),
                }
            }
            Err(error) => {
                warn!(request = %id, error = %error, "Prediction failed, serving recovery reply");
                MoodReport {
                    id,
                    mood: None,
                    broad_mood: BroadMood::Neutral,
                    confidence: None,
                    reply: replies::recovery_reply(),
                    outcome: Outcome::Failed,
                    processing_time_ms: start.elapsed().as_millis() as u64,
                    timestamp: Utc::now(),
                }
            }
        }
    }
}
