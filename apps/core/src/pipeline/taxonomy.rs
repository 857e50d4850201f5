//! Mood taxonomy: fine-grained classifier labels resolve to a reply family
//! and a broad sentiment bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// Coarse sentiment bucket reported on the wire and used for reply tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadMood {
    Positive,
    Negative,
    Neutral,
}

impl BroadMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadMood::Positive => "positive",
            BroadMood::Negative => "negative",
            BroadMood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BroadMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mood group the reply book is keyed by. Every fine-grained label the
/// classifier can emit should resolve to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodFamily {
    Happy,
    Sad,
    Angry,
    Neutral,
    Fear,
    Surprise,
    Disgust,
}

impl MoodFamily {
    /// Broad bucket this family rolls up into.
    pub fn broad(self) -> BroadMood {
        match self {
            MoodFamily::Happy | MoodFamily::Surprise => BroadMood::Positive,
            MoodFamily::Sad | MoodFamily::Angry | MoodFamily::Fear | MoodFamily::Disgust => {
                BroadMood::Negative
            }
            MoodFamily::Neutral => BroadMood::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodFamily::Happy => "happy",
            MoodFamily::Sad => "sad",
            MoodFamily::Angry => "angry",
            MoodFamily::Neutral => "neutral",
            MoodFamily::Fear => "fear",
            MoodFamily::Surprise => "surprise",
            MoodFamily::Disgust => "disgust",
        }
    }
}

impl fmt::Display for MoodFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Synonym sets tying dataset labels to families. Labels are matched
/// case-insensitively, exact hits first, then substring containment.
const FAMILY_SYNONYMS: &[(MoodFamily, &[&str])] = &[
    (
        MoodFamily::Happy,
        &[
            "happy", "joy", "joyful", "glad", "content", "pleased", "delighted", "cheerful",
            "excited", "positive",
        ],
    ),
    (
        MoodFamily::Sad,
        &["sad", "sadness", "down", "unhappy", "depressed", "miserable", "gloomy"],
    ),
    (
        MoodFamily::Angry,
        &["angry", "anger", "mad", "furious", "irritated", "annoyed"],
    ),
    (
        MoodFamily::Neutral,
        &["neutral", "ok", "fine", "meh", "indifferent"],
    ),
    (
        MoodFamily::Fear,
        &["fear", "scared", "terrified", "anxious", "nervous", "afraid"],
    ),
    (
        MoodFamily::Surprise,
        &["surprise", "surprised", "astonished", "shocked"],
    ),
    (MoodFamily::Disgust, &["disgust", "disgusted", "repulsed"]),
];

// Flattened and sorted longest-first so that containment checks prefer the
// most specific synonym ("very unhappy" hits "unhappy" before "happy").
static SYNONYMS_BY_LENGTH: LazyLock<Vec<(&'static str, MoodFamily)>> = LazyLock::new(|| {
    let mut entries: Vec<(&'static str, MoodFamily)> = FAMILY_SYNONYMS
        .iter()
        .flat_map(|(family, synonyms)| synonyms.iter().map(move |s| (*s, *family)))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
    entries
});

/// Resolve a fine-grained label to its reply family, if the taxonomy
/// knows it. Exact synonym matches win over containment, so "unhappy"
/// lands in the sad family even though it contains "happy".
pub fn family_of(label: &str) -> Option<MoodFamily> {
    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    for (synonym, family) in SYNONYMS_BY_LENGTH.iter() {
        if needle == *synonym {
            return Some(*family);
        }
    }
    for (synonym, family) in SYNONYMS_BY_LENGTH.iter() {
        if needle.contains(synonym) {
            return Some(*family);
        }
    }
    None
}

/// Map a fine-grained mood label to its broad category.
///
/// A label outside the taxonomy is a configuration gap in the mapping
/// table, not a request error: emit a diagnostic and serve neutral.
pub fn classify_broad(label: &str) -> BroadMood {
    match family_of(label) {
        Some(family) => family.broad(),
        None => {
            warn!(label = %label, "Mood label missing from taxonomy, defaulting to neutral");
            BroadMood::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_their_bucket() {
        assert_eq!(classify_broad("happy"), BroadMood::Positive);
        assert_eq!(classify_broad("joy"), BroadMood::Positive);
        assert_eq!(classify_broad("surprise"), BroadMood::Positive);
        assert_eq!(classify_broad("sad"), BroadMood::Negative);
        assert_eq!(classify_broad("anger"), BroadMood::Negative);
        assert_eq!(classify_broad("fear"), BroadMood::Negative);
        assert_eq!(classify_broad("disgust"), BroadMood::Negative);
        assert_eq!(classify_broad("neutral"), BroadMood::Neutral);
    }

    #[test]
    fn test_exact_match_beats_containment() {
        // "unhappy" contains "happy" but is an exact sad synonym.
        assert_eq!(family_of("unhappy"), Some(MoodFamily::Sad));
        assert_eq!(classify_broad("unhappy"), BroadMood::Negative);
    }

    #[test]
    fn test_containment_prefers_longest_synonym() {
        // Containment on "happy" alone would misfile this as Happy.
        assert_eq!(family_of("very unhappy today"), Some(MoodFamily::Sad));
        assert_eq!(family_of("joyfulness"), Some(MoodFamily::Happy));
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        assert_eq!(family_of("  SADNESS "), Some(MoodFamily::Sad));
        assert_eq!(family_of("Anxious"), Some(MoodFamily::Fear));
    }

    #[test]
    fn test_unknown_label_defaults_to_neutral() {
        assert_eq!(family_of("bewilderment"), None);
        assert_eq!(classify_broad("bewilderment"), BroadMood::Neutral);
        assert_eq!(family_of(""), None);
    }

    #[test]
    fn test_broad_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BroadMood::Negative).unwrap(),
            "\"negative\""
        );
    }
}
