//! Response envelope for one message through the mood pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::taxonomy::BroadMood;

/// How the pipeline resolved a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Normalized text went through the classifier.
    Classified,
    /// Nothing but symbols after normalization; the classifier was skipped.
    NeedMoreText,
    /// The classifier errored on this request; a recovery reply was served.
    Failed,
}

/// Everything the caller needs to render one exchange.
///
/// `id` correlates a later feedback submission with this prediction, so
/// nothing about the last prediction has to live in shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodReport {
    /// Correlation id for this prediction
    pub id: String,
    /// Fine-grained mood label; absent when the classifier was skipped or failed
    pub mood: Option<String>,
    /// Broad sentiment bucket
    pub broad_mood: BroadMood,
    /// Probability mass on the predicted label, when the model provides one
    pub confidence: Option<f32>,
    /// Canned reply chosen for the mood and conversation mode
    pub reply: String,
    /// How this message was resolved
    pub outcome: Outcome,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_wire_fields() {
        let report = MoodReport {
            id: "abc".to_string(),
            mood: Some("sad".to_string()),
            broad_mood: BroadMood::Negative,
            confidence: Some(0.71),
            reply: "I hear you.".to_string(),
            outcome: Outcome::Classified,
            processing_time_ms: 3,
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mood"], "sad");
        assert_eq!(value["broad_mood"], "negative");
        assert_eq!(value["outcome"], "classified");
        assert!(value["confidence"].as_f64().unwrap() > 0.7);
        assert!(!value["reply"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_skipped_classification_serializes_null_mood() {
        let report = MoodReport {
            id: "def".to_string(),
            mood: None,
            broad_mood: BroadMood::Neutral,
            confidence: None,
            reply: "Tell me more?".to_string(),
            outcome: Outcome::NeedMoreText,
            processing_time_ms: 0,
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["mood"].is_null());
        assert!(value["confidence"].is_null());
        assert_eq!(value["outcome"], "need_more_text");
    }
}
