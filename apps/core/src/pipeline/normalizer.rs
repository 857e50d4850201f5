//! Emoji and emoticon normalization.
//!
//! Rewrites pictographic sentiment (emoticons, Unicode emoji) into plain
//! sentiment words the vectorizer was trained on, and strips every other
//! symbol. Pure regex matching, no ML involved.

use regex::Regex;
use std::sync::LazyLock;

/// Sentiment word a pictographic form rewrites to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentToken {
    /// Smiles, grins, laughter
    Happy,
    /// Frowns, tears
    Sad,
    /// Hearts, kisses
    Love,
    /// Rage, cursing
    Anger,
    /// Flat or pondering faces
    Neutral,
    /// Decorative symbol with no sentiment reading; deleted
    Strip,
}

impl SentimentToken {
    /// Replacement text spliced in for a match. Space-padded so adjacent
    /// words never fuse with the substituted word.
    pub fn replacement(self) -> &'static str {
        match self {
            SentimentToken::Happy => " happy ",
            SentimentToken::Sad => " sad ",
            SentimentToken::Love => " love ",
            SentimentToken::Anger => " anger ",
            SentimentToken::Neutral => " neutral ",
            SentimentToken::Strip => " ",
        }
    }
}

/// One rewrite step: a pattern and the token it produces.
struct RewriteRule {
    token: SentimentToken,
    pattern: Regex,
}

fn rule(token: SentimentToken, pattern: &str, description: &str) -> RewriteRule {
    RewriteRule {
        token,
        pattern: Regex::new(pattern).expect(description),
    }
}

// Compile patterns once at startup. Order matters twice over: emoticon
// rules run before the emoji blocks (":(" must become "sad" before any
// symbol sweep), and tagged classes run before the generic strip rules
// that would otherwise swallow them.
static REWRITE_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        // ASCII emoticons. The angry frown outranks the plain frown so
        // ">:(" is not split into ">" plus a sad match.
        rule(SentimentToken::Anger, r">:-?\(+", "Invalid regex: angry frown emoticon"),
        rule(SentimentToken::Sad, r"[:;]'?-?\(+", "Invalid regex: frown emoticon"),
        rule(SentimentToken::Sad, r":-[/\\]", "Invalid regex: skeptical emoticon"),
        rule(SentimentToken::Sad, r"(?i)\bt_t\b", "Invalid regex: crying face emoticon"),
        rule(SentimentToken::Sad, r";_;", "Invalid regex: weeping emoticon"),
        rule(SentimentToken::Happy, r"[:;=]-?\)+", "Invalid regex: smile emoticon"),
        rule(SentimentToken::Happy, r"[:;=]-?D\b", "Invalid regex: grin emoticon"),
        rule(SentimentToken::Happy, r"(?i)\bxd\b", "Invalid regex: laughing emoticon"),
        rule(SentimentToken::Happy, r"\^_\^|\^-\^", "Invalid regex: joyful eyes emoticon"),
        rule(SentimentToken::Love, r"<3+", "Invalid regex: heart emoticon"),
        rule(SentimentToken::Love, r"[:;]-?\*", "Invalid regex: kiss emoticon"),
        rule(SentimentToken::Neutral, r"-_-", "Invalid regex: flat face emoticon"),
        rule(SentimentToken::Neutral, r":-?\|", "Invalid regex: straight mouth emoticon"),
        rule(SentimentToken::Neutral, r"(?i)\bo_o\b", "Invalid regex: blank stare emoticon"),
        // Unicode emoji with a clear sentiment reading.
        rule(
            SentimentToken::Sad,
            r"[\u{1F614}\u{1F61E}\u{1F61F}\u{1F622}\u{1F62D}\u{1F641}\u{1F63F}\u{2639}]",
            "Invalid regex: sad emoji block",
        ),
        rule(
            SentimentToken::Happy,
            r"[\u{1F600}-\u{1F607}\u{1F60A}\u{1F60B}\u{1F642}\u{1F923}]",
            "Invalid regex: happy emoji block",
        ),
        rule(
            SentimentToken::Love,
            r"[\u{2764}\u{1F48B}\u{1F495}-\u{1F49F}\u{1F60D}\u{1F617}-\u{1F61A}\u{1F970}]",
            "Invalid regex: love emoji block",
        ),
        rule(
            SentimentToken::Anger,
            r"[\u{1F47F}\u{1F620}\u{1F621}\u{1F624}\u{1F92C}]",
            "Invalid regex: anger emoji block",
        ),
        rule(
            SentimentToken::Neutral,
            r"[\u{1F610}\u{1F611}\u{1F62A}\u{1F634}\u{1F636}\u{1F914}]",
            "Invalid regex: neutral emoji block",
        ),
        // Everything else pictographic is deleted: symbol and dingbat
        // blocks, the supplementary emoji planes, and the invisible
        // joiners left behind by composed sequences.
        rule(
            SentimentToken::Strip,
            r"[\u{2600}-\u{27BF}\u{2B00}-\u{2BFF}]",
            "Invalid regex: symbol block sweep",
        ),
        rule(
            SentimentToken::Strip,
            r"[\u{1F000}-\u{1FAFF}]",
            "Invalid regex: emoji plane sweep",
        ),
        rule(
            SentimentToken::Strip,
            r"[\u{FE0F}\u{200D}\u{20E3}]",
            "Invalid regex: joiner and modifier sweep",
        ),
    ]
});

/// Rewrite emoji and emoticons in `input` into sentiment words and collapse
/// whitespace.
///
/// Returns an empty string when the input carries no real words at all, a
/// bare "😀😀" or ":(" included. Sentiment words substituted for symbols
/// only count when at least one genuine word accompanies them; otherwise
/// there is nothing the classifier could read. The function is idempotent:
/// its output passes through unchanged.
pub fn normalize(input: &str) -> String {
    let mut residue = input.to_string();
    for rewrite in REWRITE_RULES.iter() {
        residue = rewrite
            .pattern
            .replace_all(&residue, SentimentToken::Strip.replacement())
            .into_owned();
    }
    if collapse_whitespace(&residue).is_empty() {
        return String::new();
    }

    let mut text = input.to_string();
    for rewrite in REWRITE_RULES.iter() {
        text = rewrite
            .pattern
            .replace_all(&text, rewrite.token.replacement())
            .into_owned();
    }
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(normalize("i had a long day"), "i had a long day");
    }

    #[test]
    fn test_emoticons_become_sentiment_words() {
        assert_eq!(normalize("i am sad :("), "i am sad sad");
        assert_eq!(normalize("great news :)"), "great news happy");
        assert_eq!(normalize("miss you <3"), "miss you love");
        assert_eq!(normalize("whatever :|"), "whatever neutral");
        assert_eq!(normalize(">:( at you"), "anger at you");
    }

    #[test]
    fn test_emoji_runs_become_repeated_words() {
        assert_eq!(normalize("hi    there 😀😀"), "hi there happy happy");
        assert_eq!(normalize("so done 😢"), "so done sad");
        assert_eq!(normalize("furious 😡😡"), "furious anger anger");
    }

    #[test]
    fn test_symbol_only_input_is_empty() {
        assert_eq!(normalize("😀😀"), "");
        assert_eq!(normalize(":("), "");
        assert_eq!(normalize("✨ 🎉"), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_unknown_symbols_are_stripped() {
        assert_eq!(normalize("look ✨ stars"), "look stars");
        assert_eq!(normalize("good job 👍"), "good job");
        assert_eq!(normalize("party 🎉🎉 tonight"), "party tonight");
    }

    #[test]
    fn test_composed_sequences_leave_no_residue() {
        // Skin tone modifier and a ZWJ family sequence.
        assert_eq!(normalize("wave 👋🏽 bye"), "wave bye");
        assert_eq!(normalize("my 👨\u{200D}👩\u{200D}👧 visits"), "my visits");
    }

    #[test]
    fn test_urls_are_not_mangled() {
        let out = normalize("see http://example.com :(");
        assert!(out.contains("http://example.com"));
        assert!(out.ends_with("sad"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "i am sad :(",
            "hi    there 😀😀",
            "😀😀",
            "mixed <3 bag :| here",
            "plain words only",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
