//! Raw feed body to plain text.
//!
//! Markup, platform boilerplate, header/footer lines, URLs and call-to-action
//! words are removed so the extractors only see the author's prose.

use std::sync::LazyLock;

use regex::Regex;

/// Literal platform phrases removed anywhere in the text.
const BOILERPLATE_PHRASES: &[&str] = &[
    "Subscribe now",
    "Leave a comment",
    "Paid subscribers only",
    "This post is for paid subscribers",
    "Upgrade to paid",
    "Share this post",
    "Thanks for reading",
    "Give a gift subscription",
    "Continue reading",
    "Read in app",
    "Get the app",
    "Start writing",
];

/// Call-to-action words removed after whitespace is collapsed. Longer
/// phrases come first so they win over their prefixes.
const CTA_PHRASES: &[&str] = &[
    "Sign up now",
    "Sign up",
    "Join now",
    "Register now",
    "Buy now",
    "Click here",
    "Learn more",
    "Subscribe",
    "Share",
    "Comment",
    "Like",
];

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static BOILERPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| phrase_regex(BOILERPLATE_PHRASES, false));

static HEADER_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:newsletter by|subscribe to|unsubscribe)\b.*$\n?")
        .expect("valid header/footer regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

static NEWLINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"));

static ANY_WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static CTA_RE: LazyLock<Regex> = LazyLock::new(|| phrase_regex(CTA_PHRASES, true));

fn phrase_regex(phrases: &[&str], word_bounded: bool) -> Regex {
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = if word_bounded {
        format!(r"(?i)\b(?:{alternation})\b")
    } else {
        format!(r"(?i)(?:{alternation})")
    };
    Regex::new(&pattern).expect("valid phrase regex")
}

/// Normalize a raw post body into plain text.
///
/// Never fails; the result may be empty and never contains a newline.
/// Header and footer lines are matched once, against the body's own line
/// structure, and only when the body has more than one line. The unanchored
/// removals then repeat until the text stops changing, so
/// `normalize_content(normalize_content(x)) == normalize_content(x)`.
#[must_use]
pub fn normalize_content(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, "");
    let text = BOILERPLATE_RE.replace_all(&text, " ").into_owned();
    let text = if text.contains('\n') {
        HEADER_FOOTER_RE.replace_all(&text, "").into_owned()
    } else {
        text
    };

    // Every change below shortens the text or turns a whitespace character
    // into a space, which bounds the loop.
    let mut current = cleanup_pass(&text);
    loop {
        let next = cleanup_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn cleanup_pass(input: &str) -> String {
    let text = TAG_RE.replace_all(input, "");
    let text = BOILERPLATE_RE.replace_all(&text, " ");
    let text = URL_RE.replace_all(&text, "");
    // Paragraph breaks do not survive the second collapse; downstream
    // extractors only need sentence punctuation.
    let text = NEWLINE_RUN_RE.replace_all(&text, "\n\n");
    let text = WHITESPACE_RUN_RE.replace_all(&text, " ");
    let text = CTA_RE.replace_all(&text, " ");
    let text = ANY_WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}
