use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::polarity::Polarity;

/// The conversational context selected by the caller. Influences reply
/// phrasing only; the classifier never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationMode {
    Therapy,
    Education,
    Corporate,
}

impl ConversationMode {
    /// Returns a human-readable label for the mode
    pub fn label(&self) -> &'static str {
        match self {
            ConversationMode::Therapy => "therapy",
            ConversationMode::Education => "education",
            ConversationMode::Corporate => "corporate",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ConversationMode {
    type Err = AppError;

    /// Parsing is case-insensitive; the UI sends capitalized names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "therapy" => Ok(ConversationMode::Therapy),
            "education" => Ok(ConversationMode::Education),
            "corporate" => Ok(ConversationMode::Corporate),
            other => Err(AppError::Validation(format!("Unknown mode: {}", other))),
        }
    }
}

/// Incoming chat payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// The raw user message, possibly emoji-laden.
    #[validate(length(max = 8192))]
    pub message: String,
    /// Conversation mode name (e.g. "Therapy"). Parsed case-insensitively.
    pub mode: String,
}

/// Incoming feedback payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    /// Free-text feedback from the user.
    #[validate(length(max = 8192))]
    pub text: String,
    /// The mood the classifier predicted (optional).
    #[serde(default)]
    pub predicted: String,
    /// The mood the user says they actually felt (optional).
    #[serde(default)]
    pub actual: String,
    /// Correlation id of the prediction this feedback refers to, if any.
    #[serde(default)]
    pub prediction_id: Option<String>,
}

/// Response to a feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
    /// Polarity detected in the feedback text itself.
    pub sentiment: Polarity,
}

/// Response to a health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Number of mood labels the loaded model can produce.
    pub labels: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing_is_case_insensitive() {
        assert_eq!(
            "Therapy".parse::<ConversationMode>().unwrap(),
            ConversationMode::Therapy
        );
        assert_eq!(
            "EDUCATION".parse::<ConversationMode>().unwrap(),
            ConversationMode::Education
        );
        assert_eq!(
            " corporate ".parse::<ConversationMode>().unwrap(),
            ConversationMode::Corporate
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = "pirate".parse::<ConversationMode>();
        assert!(err.is_err());
    }

    #[test]
    fn test_chat_request_deserializes() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hello", "mode": "Therapy"}"#).unwrap();
        assert_eq!(req.message, "hello");
        assert_eq!(req.mode, "Therapy");
    }

    #[test]
    fn test_feedback_request_defaults() {
        let req: FeedbackRequest = serde_json::from_str(r#"{"text": "nice"}"#).unwrap();
        assert_eq!(req.predicted, "");
        assert_eq!(req.actual, "");
        assert!(req.prediction_id.is_none());
    }
}
