//! Shared domain types, configuration loading, and the built-in subject
//! profile table for subscope.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod profiles;
pub mod subject;
pub mod types;

pub use app_config::{AppConfig, Environment, ModelConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use profiles::{SubjectEntry, SubjectProfile, SubjectProfiles};
pub use subject::{is_url_safe_slug, slugify, AnalysisOutcome, AnalysisRequest, Subject};
pub use types::{
    AnalysisReport, Arousal, ArousalLevel, BrandProfile, EmotionalTone, IdentityFrame,
    ImpactLevel, LanguagePatterns, LanguageSignals, MetaphorFrame, MetaphorProfile, MissionVision,
    Motivation, MotivationStyle, Positioning, Post, PrimaryFrame, PronounProfile,
    PsychologicalTrigger, Sense, SensoryAnchors, TemporalFocus, TimeOrientation, Tone,
    TransformationNarrative, VocabularyComplexity,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to parse subject profiles: {0}")]
    ProfilesParse(#[from] serde_yaml::Error),

    #[error("subject profile validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
}
