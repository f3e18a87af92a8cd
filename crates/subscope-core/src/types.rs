//! Report and post types persisted as JSON.
//!
//! Field names are serialized in camelCase and must stay stable: the roster
//! and analysis documents are read by tooling outside this workspace.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry, as retrieved and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub raw_content: String,
    /// Plain text produced by the content normalizer.
    #[serde(rename = "content")]
    pub normalized_content: String,
    #[serde(rename = "date")]
    pub published_at: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsychologicalTrigger {
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(rename = "frequency")]
    pub frequency_count: usize,
    /// At most three distinct matched snippets, in first-occurrence order.
    #[serde(rename = "examples")]
    pub example_snippets: Vec<String>,
    #[serde(rename = "impact")]
    pub impact_level: ImpactLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positioning {
    #[serde(rename = "archetype")]
    pub archetype_label: String,
    /// 0–100.
    #[serde(rename = "authority")]
    pub authority_score: u8,
    /// 0–100.
    #[serde(rename = "relatability")]
    pub relatability_score: u8,
    /// 0–100.
    #[serde(rename = "expertise")]
    pub expertise_score: u8,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    #[serde(rename = "primary")]
    pub primary_label: String,
    #[serde(rename = "secondary")]
    pub secondary_labels: Vec<String>,
    #[serde(rename = "emotionalRange")]
    pub emotional_range_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub positioning: Positioning,
    pub tone: Tone,
    #[serde(rename = "uniqueValue")]
    pub unique_value_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyComplexity {
    /// Part of the persisted vocabulary; the heuristic never assigns it.
    Simple,
    Moderate,
    Complex,
}

impl std::fmt::Display for VocabularyComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularyComplexity::Simple => write!(f, "simple"),
            VocabularyComplexity::Moderate => write!(f, "moderate"),
            VocabularyComplexity::Complex => write!(f, "complex"),
        }
    }
}

/// Positive / neutral / negative word shares, each an integer percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmotionalTone {
    pub positive: u8,
    pub neutral: u8,
    pub negative: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrimaryFrame {
    You,
    I,
    We,
}

impl std::fmt::Display for PrimaryFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimaryFrame::You => write!(f, "YOU"),
            PrimaryFrame::I => write!(f, "I"),
            PrimaryFrame::We => write!(f, "WE"),
        }
    }
}

/// Share of second-, first-singular-, and first-plural-person pronouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFrame {
    pub you: u8,
    pub i: u8,
    pub we: u8,
    pub primary: PrimaryFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaphorFrame {
    Journey,
    War,
    Building,
    Game,
    Nature,
    Machine,
}

/// Hits per metaphor family. `dominant` is `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaphorProfile {
    pub counts: BTreeMap<MetaphorFrame, usize>,
    pub dominant: Option<MetaphorFrame>,
    /// Number of families with at least one hit.
    pub diversity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOrientation {
    Past,
    Present,
    Future,
}

/// Past / present / future markers as shares of all time markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemporalFocus {
    pub past: u8,
    pub present: u8,
    pub future: u8,
    pub orientation: Option<TimeOrientation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Visual,
    Auditory,
    Kinesthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensoryAnchors {
    pub visual: usize,
    pub auditory: usize,
    pub kinesthetic: usize,
    pub dominant: Option<Sense>,
    /// Sensory words as a percentage of all words.
    pub richness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotivationStyle {
    FearBased,
    #[default]
    AspirationBased,
}

/// Fear versus aspiration vocabulary, as shares of both combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Motivation {
    pub fear: u8,
    pub aspiration: u8,
    pub style: MotivationStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArousalLevel {
    High,
    #[default]
    Low,
}

/// Urgent versus calm word counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Arousal {
    pub urgent: usize,
    pub calm: usize,
    pub level: ArousalLevel,
}

/// Which pronoun family strictly dominates the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PronounProfile {
    #[serde(rename = "Authority/Expertise")]
    Authority,
    #[serde(rename = "Persuasion/Personalization")]
    Persuasion,
    #[serde(rename = "Community/Solidarity")]
    Community,
    #[default]
    Balanced,
}

/// Word-list signals beyond tone: metaphor, time, senses, motivation,
/// arousal, and pronoun profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSignals {
    pub metaphors: MetaphorProfile,
    pub temporal_focus: TemporalFocus,
    pub sensory_anchors: SensoryAnchors,
    pub motivation: Motivation,
    pub arousal: Arousal,
    pub pronoun_profile: PronounProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePatterns {
    pub vocabulary_complexity: VocabularyComplexity,
    pub sentence_structure: String,
    pub emotional_tone: EmotionalTone,
    pub common_phrases: Vec<String>,
    pub power_words: Vec<String>,
    pub rhetorical_devices: Vec<String>,
    pub identity_frame: IdentityFrame,
    /// Absent from reports written before these signals existed.
    #[serde(default)]
    pub signals: LanguageSignals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationNarrative {
    pub before_state: String,
    pub after_state: String,
    pub journey: Vec<String>,
    pub promises: Vec<String>,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionVision {
    pub mission: String,
    pub vision: String,
    pub values: Vec<String>,
}

/// The full analysis document for one subject.
///
/// A new report always replaces the previous one for the same subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Report id; identical to the subject slug.
    pub id: String,
    #[serde(rename = "influencerId")]
    pub subject_id: String,
    #[serde(rename = "influencerName")]
    pub subject_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub posts: Vec<Post>,
    pub brand_profile: BrandProfile,
    pub language_patterns: LanguagePatterns,
    pub psychological_triggers: Vec<PsychologicalTrigger>,
    pub transformation_narrative: TransformationNarrative,
    pub mission_vision: MissionVision,
    #[serde(rename = "overallAssessment")]
    pub overall_assessment_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_enums_use_readable_labels() {
        assert_eq!(
            serde_json::to_value(PronounProfile::Community).unwrap(),
            "Community/Solidarity"
        );
        assert_eq!(
            serde_json::to_value(MotivationStyle::FearBased).unwrap(),
            "fear-based"
        );
        let metaphors = MetaphorProfile {
            counts: BTreeMap::from([(MetaphorFrame::Journey, 2)]),
            dominant: Some(MetaphorFrame::Journey),
            diversity: 1,
        };
        let value = serde_json::to_value(&metaphors).unwrap();
        assert_eq!(value["counts"]["journey"], 2);
        assert_eq!(value["dominant"], "journey");
    }

    #[test]
    fn impact_level_serializes_lowercase() {
        let json = serde_json::to_string(&ImpactLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn trigger_uses_persisted_field_names() {
        let trigger = PsychologicalTrigger {
            type_label: "FOMO".to_string(),
            frequency_count: 2,
            example_snippets: vec!["last chance".to_string()],
            impact_level: ImpactLevel::Medium,
        };
        let value = serde_json::to_value(&trigger).unwrap();
        assert_eq!(value["type"], "FOMO");
        assert_eq!(value["frequency"], 2);
        assert_eq!(value["examples"][0], "last chance");
        assert_eq!(value["impact"], "medium");
    }

    #[test]
    fn post_renames_normalized_content_and_date() {
        let post = Post {
            id: "p1".to_string(),
            title: "Hello".to_string(),
            raw_content: "<p>Hello</p>".to_string(),
            normalized_content: "Hello".to_string(),
            published_at: None,
            link: None,
            author: None,
            categories: BTreeSet::new(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["content"], "Hello");
        assert_eq!(value["rawContent"], "<p>Hello</p>");
        assert!(value.get("date").is_some());
    }

    #[test]
    fn identity_frame_primary_is_uppercase() {
        let frame = IdentityFrame {
            you: 50,
            i: 30,
            we: 20,
            primary: PrimaryFrame::You,
        };
        let value = serde_json::to_value(frame).unwrap();
        assert_eq!(value["primary"], "YOU");
    }

    #[test]
    fn tone_uses_short_field_names() {
        let tone = Tone {
            primary_label: "Optimistic".to_string(),
            secondary_labels: vec!["punchy".to_string()],
            emotional_range_text: "High-energy".to_string(),
        };
        let value = serde_json::to_value(&tone).unwrap();
        assert_eq!(value["primary"], "Optimistic");
        assert_eq!(value["secondary"][0], "punchy");
        assert_eq!(value["emotionalRange"], "High-energy");
    }
}
