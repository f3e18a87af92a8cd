//! Pattern-based feature extractors.
//!
//! Every extractor is a pure function of the combined normalized text of one
//! subject's posts. None of them share state, so callers may run them in any
//! order.

pub mod language;
pub mod phrases;
pub mod signals;
pub mod templates;
pub mod triggers;

use subscope_core::LanguagePatterns;

pub use language::{
    emotional_tone, identity_frame, power_words, rhetorical_devices, sentence_structure,
    vocabulary_complexity,
};
pub use phrases::extract_common_phrases;
pub use signals::language_signals;
pub use templates::{mission_vision, transformation_narrative};
pub use triggers::extract_triggers;

/// Lowercased word tokens with surrounding punctuation removed.
///
/// Curly apostrophes are folded to `'` so contractions like "you’re" match
/// the same word lists as "you're".
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Build the heuristic language-pattern fragment of a report.
#[must_use]
pub fn language_patterns(text: &str) -> LanguagePatterns {
    LanguagePatterns {
        vocabulary_complexity: vocabulary_complexity(text),
        sentence_structure: sentence_structure(text),
        emotional_tone: emotional_tone(text),
        common_phrases: extract_common_phrases(text),
        power_words: power_words(text),
        rhetorical_devices: rhetorical_devices(text),
        identity_frame: identity_frame(text),
        signals: language_signals(text),
    }
}
