//! Lexicon-based polarity scoring for feedback text.
//!
//! A small dictionary of signed word scores. The mean score over matched
//! words is classified against +-0.1 thresholds; unmatched text is neutral.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Polarity classification of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Word -> signed score entries, roughly in [-1.0, 1.0].
const LEXICON_ENTRIES: &[(&str, f32)] = &[
    // Positive
    ("amazing", 0.9),
    ("awesome", 0.9),
    ("excellent", 0.9),
    ("fantastic", 0.9),
    ("wonderful", 0.9),
    ("perfect", 0.9),
    ("love", 0.8),
    ("loved", 0.8),
    ("great", 0.8),
    ("brilliant", 0.8),
    ("delightful", 0.8),
    ("thrilled", 0.8),
    ("happy", 0.7),
    ("glad", 0.6),
    ("pleased", 0.6),
    ("helpful", 0.6),
    ("good", 0.5),
    ("nice", 0.5),
    ("enjoyed", 0.5),
    ("accurate", 0.5),
    ("useful", 0.5),
    ("better", 0.4),
    ("fun", 0.4),
    ("thanks", 0.4),
    ("thank", 0.4),
    ("right", 0.3),
    ("fine", 0.2),
    ("okay", 0.1),
    ("ok", 0.1),
    // Negative
    ("terrible", -0.9),
    ("horrible", -0.9),
    ("awful", -0.9),
    ("worst", -0.9),
    ("hate", -0.8),
    ("hated", -0.8),
    ("useless", -0.8),
    ("broken", -0.7),
    ("angry", -0.7),
    ("furious", -0.8),
    ("disgusting", -0.8),
    ("miserable", -0.7),
    ("depressing", -0.7),
    ("sad", -0.6),
    ("disappointed", -0.6),
    ("disappointing", -0.6),
    ("annoying", -0.6),
    ("frustrating", -0.6),
    ("bad", -0.5),
    ("wrong", -0.5),
    ("poor", -0.5),
    ("confusing", -0.4),
    ("slow", -0.3),
    ("worse", -0.4),
    ("meh", -0.2),
];

/// Lexicon-based polarity scorer.
pub struct PolarityScorer {
    lexicon: HashMap<&'static str, f32>,
    threshold: f32,
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON_ENTRIES.iter().copied().collect(),
            threshold: 0.1,
        }
    }

    /// Mean signed score over the words found in the lexicon.
    /// Texts with no recognized sentiment words score 0.0.
    pub fn score(&self, text: &str) -> f32 {
        let mut total = 0.0f32;
        let mut matched = 0usize;

        for word in tokenize(text) {
            if let Some(&weight) = self.lexicon.get(word.as_str()) {
                total += weight;
                matched += 1;
            }
        }

        if matched == 0 {
            0.0
        } else {
            total / matched as f32
        }
    }

    /// Classify against the +-0.1 thresholds.
    pub fn classify(&self, text: &str) -> Polarity {
        let score = self.score(text);
        if score > self.threshold {
            Polarity::Positive
        } else if score < -self.threshold {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches('\'').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
