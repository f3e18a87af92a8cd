//! Word-list signals: metaphor families, time orientation, sensory anchors,
//! motivation, arousal, and pronoun profile.

use std::collections::BTreeMap;

use subscope_core::{
    Arousal, ArousalLevel, LanguageSignals, MetaphorFrame, MetaphorProfile, Motivation,
    MotivationStyle, PronounProfile, Sense, SensoryAnchors, TemporalFocus, TimeOrientation,
};

use super::language::{percent, I_WORDS, WE_WORDS, YOU_WORDS};
use super::tokenize;

const METAPHOR_FAMILIES: &[(MetaphorFrame, &[&str])] = &[
    (
        MetaphorFrame::Journey,
        &["journey", "path", "road", "destination", "step", "milestone", "progress"],
    ),
    (
        MetaphorFrame::War,
        &["battle", "fight", "attack", "defend", "strategy", "weapon", "victory", "defeat"],
    ),
    (
        MetaphorFrame::Building,
        &["build", "foundation", "construct", "structure", "framework", "blueprint"],
    ),
    (
        MetaphorFrame::Game,
        &["game", "play", "win", "lose", "score", "rules", "level", "player"],
    ),
    (
        MetaphorFrame::Nature,
        &["grow", "seed", "plant", "harvest", "bloom", "root", "branch"],
    ),
    (
        MetaphorFrame::Machine,
        &["system", "process", "mechanism", "engine", "operate", "function"],
    ),
];

const PAST_MARKERS: &[&str] = &[
    "was", "were", "had", "did", "used to", "remember", "back then", "previously", "before",
    "yesterday", "last", "ago", "history",
];
const PRESENT_MARKERS: &[&str] = &[
    "is", "are", "now", "today", "currently", "right now", "at this moment", "these days",
    "nowadays",
];
const FUTURE_MARKERS: &[&str] = &[
    "will", "going to", "gonna", "shall", "tomorrow", "soon", "eventually", "later", "next",
    "future", "upcoming",
];

const VISUAL_WORDS: &[&str] = &[
    "see", "look", "watch", "picture", "imagine", "visualize", "appear", "show", "view",
    "observe", "notice", "glimpse", "vision",
];
const AUDITORY_WORDS: &[&str] = &[
    "hear", "listen", "sound", "tell", "say", "speak", "voice", "tone", "ring", "echo",
    "whisper", "loud", "quiet",
];
const KINESTHETIC_WORDS: &[&str] = &[
    "feel", "touch", "grab", "hold", "push", "pull", "heavy", "light", "smooth", "rough",
    "warm", "cold", "pressure",
];

const FEAR_WORDS: &[&str] = &[
    "afraid", "fear", "danger", "risk", "threat", "avoid", "escape", "protect", "defend", "lose",
    "miss", "fail", "mistake", "regret", "worried", "anxious", "scared", "terrified",
];
const ASPIRATION_WORDS: &[&str] = &[
    "achieve", "success", "grow", "improve", "goal", "dream", "vision", "opportunity",
    "potential", "possibility", "win", "gain", "benefit", "reward", "accomplish", "excel",
    "thrive",
];

const URGENT_WORDS: &[&str] = &[
    "now", "immediately", "urgent", "quick", "fast", "hurry", "asap", "today", "must", "need",
    "critical", "important",
];
const CALM_WORDS: &[&str] = &[
    "relax", "calm", "peace", "steady", "patient", "gradual", "slowly", "eventually", "sometime",
    "whenever", "perhaps",
];

/// Occurrences of list entries in `tokens`. Multi-word entries match runs of
/// consecutive tokens.
fn count_hits(tokens: &[String], list: &[&str]) -> usize {
    list.iter()
        .map(|entry| {
            let parts: Vec<&str> = entry.split(' ').collect();
            tokens
                .windows(parts.len())
                .filter(|window| window.iter().zip(&parts).all(|(t, p)| t.as_str() == *p))
                .count()
        })
        .sum()
}

/// First key with the strictly highest non-zero count.
fn dominant<T: Copy>(counts: &[(T, usize)]) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for &(key, count) in counts {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

#[must_use]
pub fn metaphor_profile(text: &str) -> MetaphorProfile {
    let tokens = tokenize(text);
    let counts: Vec<(MetaphorFrame, usize)> = METAPHOR_FAMILIES
        .iter()
        .map(|(frame, words)| (*frame, count_hits(&tokens, words)))
        .collect();

    MetaphorProfile {
        dominant: dominant(&counts),
        diversity: counts.iter().filter(|(_, c)| *c > 0).count(),
        counts: counts.into_iter().collect::<BTreeMap<_, _>>(),
    }
}

/// Shares of past, present and future markers among all time markers.
#[must_use]
pub fn temporal_focus(text: &str) -> TemporalFocus {
    let tokens = tokenize(text);
    let past = count_hits(&tokens, PAST_MARKERS);
    let present = count_hits(&tokens, PRESENT_MARKERS);
    let future = count_hits(&tokens, FUTURE_MARKERS);
    let total = past + present + future;

    TemporalFocus {
        past: percent(past, total),
        present: percent(present, total),
        future: percent(future, total),
        orientation: dominant(&[
            (TimeOrientation::Past, past),
            (TimeOrientation::Present, present),
            (TimeOrientation::Future, future),
        ]),
    }
}

#[must_use]
pub fn sensory_anchors(text: &str) -> SensoryAnchors {
    let tokens = tokenize(text);
    let visual = count_hits(&tokens, VISUAL_WORDS);
    let auditory = count_hits(&tokens, AUDITORY_WORDS);
    let kinesthetic = count_hits(&tokens, KINESTHETIC_WORDS);

    SensoryAnchors {
        visual,
        auditory,
        kinesthetic,
        dominant: dominant(&[
            (Sense::Visual, visual),
            (Sense::Auditory, auditory),
            (Sense::Kinesthetic, kinesthetic),
        ]),
        richness: percent(visual + auditory + kinesthetic, tokens.len()),
    }
}

/// Fear-based only when fear words outnumber aspiration words.
#[must_use]
pub fn motivation(text: &str) -> Motivation {
    let tokens = tokenize(text);
    let fear = count_hits(&tokens, FEAR_WORDS);
    let aspiration = count_hits(&tokens, ASPIRATION_WORDS);
    let total = fear + aspiration;

    Motivation {
        fear: percent(fear, total),
        aspiration: percent(aspiration, total),
        style: if fear > aspiration {
            MotivationStyle::FearBased
        } else {
            MotivationStyle::AspirationBased
        },
    }
}

#[must_use]
pub fn arousal(text: &str) -> Arousal {
    let tokens = tokenize(text);
    let urgent = count_hits(&tokens, URGENT_WORDS);
    let calm = count_hits(&tokens, CALM_WORDS);

    Arousal {
        urgent,
        calm,
        level: if urgent > calm {
            ArousalLevel::High
        } else {
            ArousalLevel::Low
        },
    }
}

/// `Balanced` unless one of I, YOU or WE strictly outnumbers both others.
#[must_use]
pub fn pronoun_profile(text: &str) -> PronounProfile {
    let tokens = tokenize(text);
    let i = count_hits(&tokens, I_WORDS);
    let you = count_hits(&tokens, YOU_WORDS);
    let we = count_hits(&tokens, WE_WORDS);

    if i > you && i > we {
        PronounProfile::Authority
    } else if you > i && you > we {
        PronounProfile::Persuasion
    } else if we > i && we > you {
        PronounProfile::Community
    } else {
        PronounProfile::Balanced
    }
}

#[must_use]
pub fn language_signals(text: &str) -> LanguageSignals {
    LanguageSignals {
        metaphors: metaphor_profile(text),
        temporal_focus: temporal_focus(text),
        sensory_anchors: sensory_anchors(text),
        motivation: motivation(text),
        arousal: arousal(text),
        pronoun_profile: pronoun_profile(text),
    }
}
