use chrono::Utc;
use subscope_core::{
    AnalysisReport, BrandProfile, LanguagePatterns, MissionVision, Positioning, Post,
    PsychologicalTrigger, Subject, SubjectProfile, SubjectProfiles, Tone, TransformationNarrative,
};

use crate::error::AnalysisError;
use crate::extract;
use crate::model::ModelClient;

/// Everything in a report that comes from the extractors.
struct ReportBody {
    brand_profile: BrandProfile,
    language_patterns: LanguagePatterns,
    psychological_triggers: Vec<PsychologicalTrigger>,
    transformation_narrative: TransformationNarrative,
    mission_vision: MissionVision,
}

/// Builds one [`AnalysisReport`] per subject.
///
/// The profile table and the optional model client are injected; with no
/// client every report is produced by the pattern-based extractors.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    profiles: &'a SubjectProfiles,
    model: Option<&'a ModelClient>,
}

impl<'a> ReportAssembler<'a> {
    #[must_use]
    pub fn new(profiles: &'a SubjectProfiles, model: Option<&'a ModelClient>) -> Self {
        Self { profiles, model }
    }

    /// Analyze `posts` for `subject`. Never fails.
    ///
    /// With a model client the five model stages run concurrently; if any of
    /// them fails the whole report is rebuilt heuristically.
    pub async fn analyze_neuropsychology(&self, subject: &Subject, posts: Vec<Post>) -> AnalysisReport {
        let text = combined_text(&posts);

        let body = match self.model {
            Some(model) => match model_body(model, &text).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        subject = %subject.id,
                        error = %e,
                        "model extraction failed; using heuristic report"
                    );
                    self.heuristic_body(&subject.id, &text)
                }
            },
            None => self.heuristic_body(&subject.id, &text),
        };

        let overall_assessment_text = overall_assessment(&subject.name, &body);

        AnalysisReport {
            id: subject.id.clone(),
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            analyzed_at: Utc::now(),
            posts,
            brand_profile: body.brand_profile,
            language_patterns: body.language_patterns,
            psychological_triggers: body.psychological_triggers,
            transformation_narrative: body.transformation_narrative,
            mission_vision: body.mission_vision,
            overall_assessment_text,
        }
    }

    fn heuristic_body(&self, slug: &str, text: &str) -> ReportBody {
        ReportBody {
            brand_profile: brand_profile_from(self.profiles.lookup(slug)),
            language_patterns: extract::language_patterns(text),
            psychological_triggers: extract::extract_triggers(text),
            transformation_narrative: extract::transformation_narrative(),
            mission_vision: extract::mission_vision(),
        }
    }
}

async fn model_body(model: &ModelClient, text: &str) -> Result<ReportBody, AnalysisError> {
    let (brand_profile, language_patterns, psychological_triggers, transformation_narrative, mission_vision) =
        tokio::try_join!(
            model.brand_profile(text),
            model.language_patterns(text),
            model.psychological_triggers(text),
            model.transformation_narrative(text),
            model.mission_vision(text),
        )?;
    Ok(ReportBody {
        brand_profile,
        language_patterns,
        psychological_triggers,
        transformation_narrative,
        mission_vision,
    })
}

fn combined_text(posts: &[Post]) -> String {
    posts
        .iter()
        .map(|p| p.normalized_content.as_str())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn brand_profile_from(profile: &SubjectProfile) -> BrandProfile {
    BrandProfile {
        positioning: Positioning {
            archetype_label: profile.archetype.clone(),
            authority_score: profile.authority,
            relatability_score: profile.relatability,
            expertise_score: profile.expertise,
            description: profile.description.clone(),
        },
        tone: Tone {
            primary_label: profile.primary_tone.clone(),
            secondary_labels: profile.secondary_tones.clone(),
            emotional_range_text: profile.emotional_range.clone(),
        },
        unique_value_text: profile.unique_value.clone(),
    }
}

fn overall_assessment(name: &str, body: &ReportBody) -> String {
    let positioning = &body.brand_profile.positioning;
    let patterns = &body.language_patterns;
    let mut text = format!(
        "{name} positions as {archetype} (authority {a}/100, relatability {r}/100, \
         expertise {e}/100). The writing reads as {tone} with {complexity} vocabulary \
         and a {frame}-centered voice.",
        archetype = positioning.archetype_label,
        a = positioning.authority_score,
        r = positioning.relatability_score,
        e = positioning.expertise_score,
        tone = body.brand_profile.tone.primary_label,
        complexity = patterns.vocabulary_complexity,
        frame = patterns.identity_frame.primary,
    );

    // First of the highest-frequency triggers.
    let dominant = body
        .psychological_triggers
        .iter()
        .rev()
        .max_by_key(|t| t.frequency_count);
    match dominant {
        Some(trigger) => text.push_str(&format!(
            " The dominant persuasion pattern is {} ({} occurrences, {} impact).",
            trigger.type_label, trigger.frequency_count, trigger.impact_level
        )),
        None => text.push_str(" No recurring persuasion triggers were detected."),
    }
    text
}
