//! Recurring four-word phrase detection.

use std::collections::HashMap;

const WINDOW: usize = 4;
const MIN_PHRASE_CHARS: usize = 10;
const MAX_PHRASE_CHARS: usize = 50;
const TOP_N: usize = 5;

/// Returned when no window qualifies at all.
pub const FALLBACK_PHRASES: &[&str] = &[
    "here's the thing",
    "let me be clear",
    "the truth is",
    "what most people miss",
    "the key insight",
];

/// Every qualifying four-word window with its count, most frequent first.
///
/// Windows are taken over lowercased whitespace-separated words; punctuation
/// stays attached. Ties keep first-seen order.
#[must_use]
pub fn ranked_phrases(text: &str) -> Vec<(String, usize)> {
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for window in words.windows(WINDOW) {
        let phrase = window.join(" ");
        let len = phrase.chars().count();
        if !(MIN_PHRASE_CHARS..=MAX_PHRASE_CHARS).contains(&len) {
            continue;
        }
        let count = counts.entry(phrase.clone()).or_insert(0);
        if *count == 0 {
            order.push(phrase);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|phrase| {
            let count = counts.get(&phrase).copied().unwrap_or_default();
            (phrase, count)
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Top five recurring phrases, or [`FALLBACK_PHRASES`] when none qualify.
#[must_use]
pub fn extract_common_phrases(text: &str) -> Vec<String> {
    let ranked = ranked_phrases(text);
    if ranked.is_empty() {
        return FALLBACK_PHRASES.iter().map(|p| (*p).to_string()).collect();
    }
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(phrase, _)| phrase)
        .collect()
}
