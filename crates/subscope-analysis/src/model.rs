//! Model-backed extractors over an OpenAI-compatible chat completions API.
//!
//! Each stage sends a bounded excerpt of the subject's text and asks for a
//! JSON object. Every failure (transport, status, missing content, or a
//! reply that does not deserialize) is reported as
//! [`AnalysisError::Extraction`] so the assembler can fall back.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use subscope_core::{
    BrandProfile, EmotionalTone, LanguagePatterns, MissionVision, ModelConfig,
    Positioning, PsychologicalTrigger, Tone, TransformationNarrative, VocabularyComplexity,
};

use crate::error::AnalysisError;
use crate::extract;

/// Characters of subject text sent with each request.
pub const CONTENT_CHAR_BUDGET: usize = 8_000;

const MAX_PHRASES: usize = 5;
const MAX_EXAMPLES: usize = 3;

const SYSTEM_PROMPT: &str = "You analyze newsletter writing for brand positioning and \
    persuasion patterns. Always reply with a single JSON object and nothing else.";

#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrandProfileReply {
    archetype: String,
    authority: f64,
    relatability: f64,
    expertise: f64,
    #[serde(default)]
    description: String,
    primary_tone: String,
    #[serde(default)]
    secondary_tones: Vec<String>,
    #[serde(default)]
    emotional_range: String,
    #[serde(default)]
    unique_value: String,
}

#[derive(Debug, Deserialize)]
struct ToneReply {
    positive: f64,
    negative: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageReply {
    vocabulary_complexity: VocabularyComplexity,
    sentence_structure: String,
    emotional_tone: ToneReply,
    #[serde(default)]
    common_phrases: Vec<String>,
}

/// A model-reported trigger. Any `impact` the model sends is ignored; impact
/// is recomputed from the category thresholds.
#[derive(Debug, Deserialize)]
struct TriggerReply {
    #[serde(rename = "type")]
    type_label: String,
    frequency: usize,
    #[serde(default)]
    examples: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TriggersReply {
    #[serde(default)]
    triggers: Vec<TriggerReply>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

/// Keep known categories with a non-zero frequency, first occurrence wins.
fn triggers_from_reply(replies: Vec<TriggerReply>) -> Vec<PsychologicalTrigger> {
    let mut triggers: Vec<PsychologicalTrigger> = Vec::new();
    for reply in replies {
        if reply.frequency == 0 {
            continue;
        }
        let Some(label) = extract::triggers::canonical_label(&reply.type_label) else {
            tracing::debug!(label = %reply.type_label, "dropping unknown trigger category");
            continue;
        };
        if triggers.iter().any(|t| t.type_label == label) {
            continue;
        }
        let Some(impact) = extract::triggers::impact_for(label, reply.frequency) else {
            continue;
        };
        let mut examples: Vec<String> = Vec::new();
        for example in reply.examples {
            if examples.len() == MAX_EXAMPLES {
                break;
            }
            if !examples.contains(&example) {
                examples.push(example);
            }
        }
        triggers.push(PsychologicalTrigger {
            type_label: label.to_string(),
            frequency_count: reply.frequency,
            example_snippets: examples,
            impact_level: impact,
        });
    }
    triggers
}

fn excerpt(text: &str) -> String {
    text.chars().take(CONTENT_CHAR_BUDGET).collect()
}

impl ModelClient {
    /// Build a client for the configured completion endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &ModelConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        stage: &'static str,
        instructions: &str,
        text: &str,
    ) -> Result<T, AnalysisError> {
        let fail = |reason: String| AnalysisError::Extraction { stage, reason };

        let req_body = json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("{instructions}\n\nContent:\n{}", excerpt(text))
                }
            ],
            "temperature": 0.2
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("unexpected HTTP status {status}")));
        }

        let body: Value = response.json().await.map_err(|e| fail(e.to_string()))?;
        let content = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| fail("response has no message content".to_string()))?;

        serde_json::from_str(content).map_err(|e| fail(format!("invalid JSON reply: {e}")))
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] when the call or its reply fails.
    pub async fn brand_profile(&self, text: &str) -> Result<BrandProfile, AnalysisError> {
        let reply: BrandProfileReply = self
            .complete_json(
                "brand_profile",
                "Describe the author's brand positioning. Return JSON with keys: \
                 archetype (short label such as \"The Strategic Mentor\"), authority, \
                 relatability, expertise (integers 0-100), description, primaryTone, \
                 secondaryTones (array of strings), emotionalRange, uniqueValue.",
                text,
            )
            .await?;

        Ok(BrandProfile {
            positioning: Positioning {
                archetype_label: reply.archetype,
                authority_score: to_score(reply.authority),
                relatability_score: to_score(reply.relatability),
                expertise_score: to_score(reply.expertise),
                description: reply.description,
            },
            tone: Tone {
                primary_label: reply.primary_tone,
                secondary_labels: reply.secondary_tones,
                emotional_range_text: reply.emotional_range,
            },
            unique_value_text: reply.unique_value,
        })
    }

    /// Model-judged complexity, structure, tone and phrases, combined with
    /// the pattern-based power words, rhetorical devices, identity frame and
    /// word-list signals.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] when the call or its reply fails.
    pub async fn language_patterns(&self, text: &str) -> Result<LanguagePatterns, AnalysisError> {
        let reply: LanguageReply = self
            .complete_json(
                "language_patterns",
                "Describe the author's language. Return JSON with keys: \
                 vocabularyComplexity (one of \"simple\", \"moderate\", \"complex\"), \
                 sentenceStructure (one sentence), emotionalTone (object with integer \
                 percentages positive and negative, 0-100), commonPhrases (up to 5 \
                 signature phrases quoted from the content).",
                text,
            )
            .await?;

        let positive = to_score(reply.emotional_tone.positive);
        let negative = to_score(reply.emotional_tone.negative).min(100 - positive);
        let mut common_phrases = reply.common_phrases;
        common_phrases.truncate(MAX_PHRASES);

        Ok(LanguagePatterns {
            vocabulary_complexity: reply.vocabulary_complexity,
            sentence_structure: reply.sentence_structure,
            emotional_tone: EmotionalTone {
                positive,
                neutral: 100 - positive - negative,
                negative,
            },
            common_phrases,
            power_words: extract::power_words(text),
            rhetorical_devices: extract::rhetorical_devices(text),
            identity_frame: extract::identity_frame(text),
            signals: extract::language_signals(text),
        })
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] when the call or its reply fails.
    pub async fn psychological_triggers(
        &self,
        text: &str,
    ) -> Result<Vec<PsychologicalTrigger>, AnalysisError> {
        let reply: TriggersReply = self
            .complete_json(
                "psychological_triggers",
                "Find persuasion triggers (FOMO, Social Proof, Authority, Transformation \
                 Promise, Reciprocity). Return JSON {\"triggers\": [{\"type\", \"frequency\" \
                 (integer), \"examples\" (up to 3 quotes), \"impact\" (\"low\", \"medium\" \
                 or \"high\")}]}. Omit triggers that do not occur.",
                text,
            )
            .await?;

        Ok(triggers_from_reply(reply.triggers))
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] when the call or its reply fails.
    pub async fn transformation_narrative(
        &self,
        text: &str,
    ) -> Result<TransformationNarrative, AnalysisError> {
        self.complete_json(
            "transformation_narrative",
            "Describe the transformation the author promises readers. Return JSON with \
             keys: beforeState, afterState, journey (array of steps), promises (array), \
             evidence (array).",
            text,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Extraction`] when the call or its reply fails.
    pub async fn mission_vision(&self, text: &str) -> Result<MissionVision, AnalysisError> {
        self.complete_json(
            "mission_vision",
            "Infer the author's mission and vision. Return JSON with keys: mission, \
             vision, values (array of short labels).",
            text,
        )
        .await
    }
}
