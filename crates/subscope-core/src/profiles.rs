//! Fixed per-subject brand positioning table.
//!
//! The heuristic analysis path does not derive archetype, scores, or tone
//! from text; it looks them up here by slug. The table is compiled into the
//! binary from `config/subjects.yaml` and is not configurable at runtime.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::subject::slugify;
use crate::ConfigError;

const BUILTIN_SUBJECTS: &str = include_str!("../config/subjects.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub archetype: String,
    pub authority: u8,
    pub relatability: u8,
    pub expertise: u8,
    pub description: String,
    pub primary_tone: String,
    #[serde(default)]
    pub secondary_tones: Vec<String>,
    pub emotional_range: String,
    pub unique_value: String,
}

/// A known subject: display name, optional feed, and its profile constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub feed_url: Option<String>,
    pub profile: SubjectProfile,
}

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    default: SubjectProfile,
    #[serde(default)]
    subjects: Vec<SubjectEntry>,
}

/// Slug-keyed profile table with a documented default for unknown subjects.
#[derive(Debug, Clone)]
pub struct SubjectProfiles {
    default: SubjectProfile,
    entries: BTreeMap<String, SubjectEntry>,
}

impl SubjectProfiles {
    /// Load the table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_SUBJECTS)
    }

    /// Parse and validate a profile table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfilesParse`] on malformed YAML and
    /// [`ConfigError::Validation`] on empty names, duplicate slugs, or scores
    /// above 100.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: ProfilesFile = serde_yaml::from_str(content)?;

        validate_profile("default", &file.default)?;

        let mut seen = HashSet::new();
        let mut entries = BTreeMap::new();
        for entry in file.subjects {
            let slug = slugify(&entry.name);
            if slug.is_empty() {
                return Err(ConfigError::Validation(
                    "subject name must be non-empty".to_string(),
                ));
            }
            if !seen.insert(slug.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate subject slug: '{slug}' (from subject '{}')",
                    entry.name
                )));
            }
            validate_profile(&slug, &entry.profile)?;
            entries.insert(slug, entry);
        }

        Ok(Self {
            default: file.default,
            entries,
        })
    }

    /// Profile for `slug`, or the default profile when the subject is unknown.
    #[must_use]
    pub fn lookup(&self, slug: &str) -> &SubjectProfile {
        self.entries
            .get(slug)
            .map_or(&self.default, |entry| &entry.profile)
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&SubjectEntry> {
        self.entries.get(slug)
    }

    #[must_use]
    pub fn default_profile(&self) -> &SubjectProfile {
        &self.default
    }

    /// Known subjects in slug order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SubjectEntry)> {
        self.entries.iter().map(|(slug, entry)| (slug.as_str(), entry))
    }
}

fn validate_profile(slug: &str, profile: &SubjectProfile) -> Result<(), ConfigError> {
    for (field, score) in [
        ("authority", profile.authority),
        ("relatability", profile.relatability),
        ("expertise", profile.expertise),
    ] {
        if score > 100 {
            return Err(ConfigError::Validation(format!(
                "profile '{slug}' has {field} {score}; must be 0-100"
            )));
        }
    }
    if profile.archetype.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "profile '{slug}' has an empty archetype"
        )));
    }
    Ok(())
}
