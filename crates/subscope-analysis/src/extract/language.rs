//! Sentence pacing, emotional tone, pronoun framing, and rhetoric.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use subscope_core::{EmotionalTone, IdentityFrame, PrimaryFrame, VocabularyComplexity};

use super::phrases::ranked_phrases;
use super::tokenize;

const COMPLEX_ABOVE_WORDS: usize = 20;
const PUNCHY_BELOW_WORDS: usize = 12;
const FLOWING_ABOVE_WORDS: usize = 18;
const MAX_POWER_WORDS: usize = 8;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "brilliant", "excellent", "fantastic", "good",
    "great", "happy", "love", "perfect", "positive", "success", "wonderful", "win", "winning",
    "opportunity", "growth", "achieve", "accomplish", "thrive", "prosper", "excel", "master",
];

const NEGATIVE_WORDS: &[&str] = &[
    "afraid", "angry", "bad", "broken", "danger", "dead", "death", "difficult", "fail", "failure",
    "fear", "hate", "horrible", "hurt", "lose", "loss", "mistake", "negative", "never", "no",
    "not", "pain", "problem", "sad", "terrible", "wrong", "worst", "crisis",
];

pub(super) const YOU_WORDS: &[&str] = &[
    "you", "your", "you're", "you've", "you'll", "you'd", "yours", "yourself",
];
pub(super) const I_WORDS: &[&str] = &[
    "i", "my", "me", "i'm", "i've", "i'll", "i'd", "mine", "myself",
];
pub(super) const WE_WORDS: &[&str] = &[
    "we", "our", "us", "we're", "we've", "we'll", "we'd", "ours", "ourselves",
];

const POWER_WORDS: &[&str] = &[
    "freedom", "leverage", "system", "systems", "proven", "secret", "simple", "powerful",
    "ultimate", "instantly", "guaranteed", "breakthrough", "unstoppable", "wealth", "growth",
    "mastery", "clarity", "focus", "purpose", "discipline", "results", "scale", "compound",
    "authentic",
];

static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

static CONTRAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnot\s+\w+,?\s+but\b|\binstead\s+of\b|\brather\s+than\b")
        .expect("valid contrast regex")
});

static LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\b(?:first|second|third)(?:ly)?\b|^\s*\d+[.)]\s").expect("valid list regex")
});

/// Sentences split on runs of `.`, `!`, or `?`; blank pieces are dropped.
fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Total words across sentences and the sentence count.
fn sentence_stats(text: &str) -> (usize, usize) {
    let sentences = sentences(text);
    let words = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum();
    (words, sentences.len())
}

/// Rounded integer percentage of `part` in `total`, capped at 100.
pub(super) fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = (part * 100 + total / 2) / total;
    u8::try_from(value.min(100)).unwrap_or(100)
}

/// `complex` when sentences average more than 20 words, else `moderate`.
///
/// `simple` is never produced here.
#[must_use]
pub fn vocabulary_complexity(text: &str) -> VocabularyComplexity {
    let (words, count) = sentence_stats(text);
    if count > 0 && words > COMPLEX_ABOVE_WORDS * count {
        VocabularyComplexity::Complex
    } else {
        VocabularyComplexity::Moderate
    }
}

/// Pacing label and average sentence length, e.g.
/// "Punchy with average 9 words per sentence".
#[must_use]
pub fn sentence_structure(text: &str) -> String {
    let (words, count) = sentence_stats(text);
    if count == 0 {
        return "Insufficient text to measure sentence structure".to_string();
    }
    let pacing = if words < PUNCHY_BELOW_WORDS * count {
        "Punchy"
    } else if words > FLOWING_ABOVE_WORDS * count {
        "Flowing"
    } else {
        "Balanced"
    };
    let average = (words + count / 2) / count;
    format!("{pacing} with average {average} words per sentence")
}

/// Positive and negative word shares of all words, on a 0-100 scale.
///
/// Word lists match case-insensitively. `neutral` takes the remainder so the
/// three values always sum to 100.
#[must_use]
pub fn emotional_tone(text: &str) -> EmotionalTone {
    let words = tokenize(text);
    let positive_hits = words
        .iter()
        .filter(|w| POSITIVE_WORDS.contains(&w.as_str()))
        .count();
    let negative_hits = words
        .iter()
        .filter(|w| NEGATIVE_WORDS.contains(&w.as_str()))
        .count();

    let positive = percent(positive_hits, words.len());
    let negative = percent(negative_hits, words.len()).min(100 - positive);
    EmotionalTone {
        positive,
        neutral: 100 - positive - negative,
        negative,
    }
}

/// Pronoun framing. Ties resolve in the order YOU, I, WE; text without
/// pronouns reports zeros with YOU as primary.
#[must_use]
pub fn identity_frame(text: &str) -> IdentityFrame {
    let words = tokenize(text);
    let count_in = |set: &[&str]| words.iter().filter(|w| set.contains(&w.as_str())).count();
    let you = count_in(YOU_WORDS);
    let i = count_in(I_WORDS);
    let we = count_in(WE_WORDS);
    let total = you + i + we;

    let primary = if you >= i && you >= we {
        PrimaryFrame::You
    } else if i >= we {
        PrimaryFrame::I
    } else {
        PrimaryFrame::We
    };

    IdentityFrame {
        you: percent(you, total),
        i: percent(i, total),
        we: percent(we, total),
        primary,
    }
}

/// Power words present in `text`, most frequent first, at most eight.
#[must_use]
pub fn power_words(text: &str) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in tokenize(text) {
        if let Some(&power) = POWER_WORDS.iter().find(|p| **p == word) {
            let count = counts.entry(power).or_insert(0);
            if *count == 0 {
                order.push(power);
            }
            *count += 1;
        }
    }
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(MAX_POWER_WORDS)
        .map(str::to_string)
        .collect()
}

/// Rhetorical devices as "Label (Nx)" entries; absent devices are omitted.
#[must_use]
pub fn rhetorical_devices(text: &str) -> Vec<String> {
    let contrasts = CONTRAST_RE.find_iter(text).count();
    let questions = text.matches('?').count();
    let lists = LIST_RE.find_iter(text).count();
    let repetitions = ranked_phrases(text)
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .count();

    let mut devices = Vec::new();
    if contrasts > 0 {
        devices.push(format!("Contrast ({contrasts}x)"));
    }
    if questions > 0 {
        devices.push(format!("Rhetorical questions ({questions}x)"));
    }
    if lists > 0 {
        devices.push(format!("Numbered lists ({lists}x)"));
    }
    if repetitions > 0 {
        devices.push(format!("Repetition ({repetitions} phrases)"));
    }
    devices
}
