//! Persuasion-trigger detection against a fixed pattern table.

use std::sync::LazyLock;

use regex::Regex;
use subscope_core::{ImpactLevel, PsychologicalTrigger};

const MAX_EXAMPLES: usize = 3;

struct TriggerRule {
    label: &'static str,
    pattern: Regex,
    /// Impact is `high` when the frequency exceeds this value.
    high_above: usize,
    /// Impact at or below `high_above`.
    otherwise: ImpactLevel,
}

impl TriggerRule {
    fn new(label: &'static str, pattern: &str, high_above: usize, otherwise: ImpactLevel) -> Self {
        Self {
            label,
            pattern: Regex::new(pattern).expect("valid trigger regex"),
            high_above,
            otherwise,
        }
    }

    fn impact(&self, frequency: usize) -> ImpactLevel {
        if frequency > self.high_above {
            ImpactLevel::High
        } else {
            self.otherwise
        }
    }
}

static RULES: LazyLock<Vec<TriggerRule>> = LazyLock::new(|| {
    vec![
        TriggerRule::new(
            "FOMO",
            r"(?i)\b(?:limited[\s-]+time|don['’]?t\s+miss|exclusive|only\s+\d+|last\s+chance|closing\s+soon|before\s+it['’]?s\s+too\s+late)\b",
            5,
            ImpactLevel::Medium,
        ),
        TriggerRule::new(
            "Social Proof",
            r"(?i)\b(?:\d[\d,]*\+?\s+(?:users|customers|subscribers|readers|people|clients|students|members|founders|creators)|testimonials?|case\s+stud(?:y|ies)|trusted\s+by)\b",
            3,
            ImpactLevel::Medium,
        ),
        TriggerRule::new(
            "Authority",
            r"(?i)\b(?:experts?|proven|research\s+shows|studies\s+show|years\s+of\s+experience|i['’]?ve\s+built|i\s+built|certified|data\s+shows)\b",
            4,
            ImpactLevel::Medium,
        ),
        TriggerRule::new(
            "Transformation Promise",
            r"(?i)\b(?:transform(?:s|ed|ing|ation|ative)?|breakthroughs?|unlock(?:s|ed|ing)?|master(?:y|ed|ing)?|become|level\s+up|life[\s-]changing|reinvent(?:s|ed|ing)?)\b",
            6,
            ImpactLevel::Medium,
        ),
        TriggerRule::new(
            "Reciprocity",
            r"(?i)\b(?:free|bonus(?:es)?|gifts?|complimentary|no\s+cost)\b",
            2,
            ImpactLevel::Low,
        ),
    ]
});

fn rule_for(label: &str) -> Option<&'static TriggerRule> {
    let label = label.trim();
    RULES.iter().find(|rule| rule.label.eq_ignore_ascii_case(label))
}

/// The table's spelling of a category label, matched case-insensitively.
#[must_use]
pub fn canonical_label(label: &str) -> Option<&'static str> {
    rule_for(label).map(|rule| rule.label)
}

/// Impact of a category seen `frequency` times, or `None` for a label
/// outside the table.
#[must_use]
pub fn impact_for(label: &str, frequency: usize) -> Option<ImpactLevel> {
    rule_for(label).map(|rule| rule.impact(frequency))
}

/// Detect every trigger category present in `text`.
///
/// Categories appear in table order. A category with no matches is omitted
/// rather than reported with frequency zero.
#[must_use]
pub fn extract_triggers(text: &str) -> Vec<PsychologicalTrigger> {
    RULES
        .iter()
        .filter_map(|rule| {
            let mut frequency = 0;
            let mut examples: Vec<String> = Vec::new();
            for m in rule.pattern.find_iter(text) {
                frequency += 1;
                let snippet = m.as_str();
                if examples.len() < MAX_EXAMPLES && !examples.iter().any(|e| e == snippet) {
                    examples.push(snippet.to_string());
                }
            }
            (frequency > 0).then(|| PsychologicalTrigger {
                type_label: rule.label.to_string(),
                frequency_count: frequency,
                example_snippets: examples,
                impact_level: rule.impact(frequency),
            })
        })
        .collect()
}
