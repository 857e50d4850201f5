//! Reply book: canned response templates keyed by mood family and
//! conversation mode, with a three-tier fallback.
//!
//! Lookup priority is fixed: a mode-specific list for the resolved family,
//! then the family's mode-agnostic list, then the generic acknowledgments.

use rand::seq::SliceRandom;
use tracing::debug;

use super::taxonomy::{family_of, BroadMood, MoodFamily};
use crate::models::ConversationMode;

/// Served when normalization leaves no words for the classifier.
pub const NEED_WORDS_REPLIES: &[&str] = &[
    "I can see the symbols, but I need a few words to go on. How are you feeling?",
    "Expressive! Could you put that into words for me?",
    "Tell me in a sentence or two what's going on?",
];

/// Served when the classifier fails on a request.
pub const RECOVERY_REPLIES: &[&str] = &[
    "Sorry, I couldn't quite process that. Could you say it another way?",
    "Something went wrong on my side reading that. Mind rephrasing?",
];

/// Served when the label resolves to no family in the reply book.
pub const GENERIC_REPLIES: &[&str] = &[
    "Thanks for sharing that. What else is on your mind?",
    "I see. Tell me a bit more so I can follow.",
    "Noted. Where would you like to take this next?",
];

/// Mode-agnostic templates per family.
pub fn mood_replies(family: MoodFamily) -> &'static [&'static str] {
    match family {
        MoodFamily::Happy => &[
            "That's wonderful to hear! 😊 Tell me more!",
            "Love that energy — what's making you smile today?",
            "Great! Keep it up — anything fun going on?",
        ],
        MoodFamily::Sad => &[
            "I'm sorry you're feeling down. Do you want to talk about it?",
            "That sounds tough. I'm here for you — what's on your mind?",
            "I hear you. Small steps can help — would you like breathing tips?",
        ],
        MoodFamily::Angry => &[
            "I can tell you're upset. Want to vent or find a solution together?",
            "That's frustrating — tell me what happened and we'll work it out.",
            "Anger is valid. Do you want some ways to calm down right now?",
        ],
        MoodFamily::Neutral => &[
            "Thanks for sharing. Anything else you'd like to add?",
            "Got it. Want to dive deeper or change the topic?",
            "Okay — how can I help further?",
        ],
        MoodFamily::Fear => &[
            "That sounds scary. Do you want to describe what's worrying you?",
            "I'm here with you — would you like some coping suggestions?",
            "It's okay to be nervous. Want grounding or breathing exercise ideas?",
        ],
        MoodFamily::Surprise => &[
            "Wow — that is surprising! Tell me more!",
            "That's unexpected — how do you feel about it?",
            "Interesting! What happened next?",
        ],
        MoodFamily::Disgust => &[
            "That sounds unpleasant. Want to talk about it?",
            "I get why you'd feel that way. Do you want a change of topic?",
            "Ugh — I hear you. Anything I can do to help?",
        ],
    }
}

/// Mode-specific templates. `None` means the mode has no tailored phrasing
/// for the family and the mode-agnostic list applies.
pub fn mode_replies(mode: ConversationMode, family: MoodFamily) -> Option<&'static [&'static str]> {
    match (mode, family) {
        (ConversationMode::Therapy, MoodFamily::Sad) => Some(&[
            "Thank you for trusting me with that. When did the heaviness start?",
            "That sounds really hard. Let's sit with it for a moment — what part weighs most?",
            "You don't have to carry this alone. Would it help to walk through it slowly?",
        ]),
        (ConversationMode::Therapy, MoodFamily::Fear) => Some(&[
            "Feeling anxious makes sense here. Let's try naming the worry out loud — what is it?",
            "Let's slow your breathing together first. What does the fear say might happen?",
        ]),
        (ConversationMode::Therapy, MoodFamily::Angry) => Some(&[
            "That anger is telling us something matters to you. What boundary got crossed?",
            "Let it out here — this is a safe place. What happened right before the anger rose?",
        ]),
        (ConversationMode::Education, MoodFamily::Happy) => Some(&[
            "That enthusiasm is great fuel for learning! What topic shall we dig into?",
            "Wonderful! Momentum like this is the best time to tackle something new.",
        ]),
        (ConversationMode::Education, MoodFamily::Sad) => Some(&[
            "Rough patches are part of learning. Want to break the problem into smaller steps?",
            "A setback isn't the end of the story. Which part tripped you up?",
        ]),
        (ConversationMode::Corporate, MoodFamily::Angry) => Some(&[
            "I hear your concern. Let's document the issue and outline next steps.",
            "Understood. Shall we draft an action plan to resolve this?",
        ]),
        (ConversationMode::Corporate, MoodFamily::Neutral) => Some(&[
            "Noted. Is there anything you'd like to prioritize today?",
            "Thanks for the update. What's the next agenda item?",
        ]),
        _ => None,
    }
}

/// Pick a reply for a classified message.
///
/// Priority order: mode-specific list for the label's family, then the
/// family's own list, then the generic acknowledgments when the label
/// resolves to no family at all.
pub fn select_reply(label: &str, broad: BroadMood, mode: ConversationMode) -> String {
    match family_of(label) {
        Some(family) => {
            if let Some(templates) = mode_replies(mode, family) {
                return choose(templates);
            }
            debug!(
                family = %family,
                mode = %mode,
                "No mode-specific reply, using the family default"
            );
            choose(mood_replies(family))
        }
        None => {
            debug!(label = %label, broad = %broad, "Label outside the reply book, using generic reply");
            choose(GENERIC_REPLIES)
        }
    }
}

/// A prompt asking the user for actual words.
pub fn need_words_reply() -> String {
    choose(NEED_WORDS_REPLIES)
}

/// A recovery message for a failed prediction.
pub fn recovery_reply() -> String {
    choose(RECOVERY_REPLIES)
}

fn choose(templates: &'static [&'static str]) -> String {
    let mut rng = rand::thread_rng();
    templates
        .choose(&mut rng)
        .copied()
        .unwrap_or("Okay. Tell me more?")
        .to_string()
}
