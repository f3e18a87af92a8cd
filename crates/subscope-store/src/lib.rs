//! File-backed persistence for the subject roster and analysis reports.
//!
//! Layout under the data directory:
//!
//! ```text
//! influencers.json          roster: JSON array of Subject
//! analyses/<slug>.json      one AnalysisReport per subject
//! ```
//!
//! Writes overwrite whole files with no locking. Concurrent writers to the
//! same subject are last-writer-wins.

use std::path::{Path, PathBuf};

use subscope_core::{AnalysisReport, Subject};
use thiserror::Error;
use tokio::fs;

const ROSTER_FILE: &str = "influencers.json";
const ANALYSES_DIR: &str = "analyses";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid slug: '{0}'")]
    InvalidSlug(String),
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

/// Slugs become file names, so anything that could escape `analyses/` is
/// rejected.
fn check_slug(slug: &str) -> Result<(), StoreError> {
    if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
        return Err(StoreError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

async fn write_json(path: &Path, bytes: Vec<u8>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(path, bytes).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl JsonStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    fn report_path(&self, slug: &str) -> PathBuf {
        self.root.join(ANALYSES_DIR).join(format!("{slug}.json"))
    }

    /// Read the roster. A missing or unreadable file is an empty roster.
    pub async fn load_roster(&self) -> Vec<Subject> {
        let path = self.roster_path();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read roster; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(subjects) => subjects,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt roster; treating as empty");
                Vec::new()
            }
        }
    }

    pub async fn get_subject(&self, slug: &str) -> Option<Subject> {
        self.load_roster().await.into_iter().find(|s| s.id == slug)
    }

    /// Replace the roster file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    pub async fn save_roster(&self, subjects: &[Subject]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(subjects)?;
        write_json(&self.roster_path(), bytes).await
    }

    /// Insert `subject`, or replace the record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the roster cannot be written.
    pub async fn upsert_subject(&self, subject: Subject) -> Result<(), StoreError> {
        let mut roster = self.load_roster().await;
        match roster.iter_mut().find(|s| s.id == subject.id) {
            Some(existing) => *existing = subject,
            None => roster.push(subject),
        }
        self.save_roster(&roster).await
    }

    /// Read the report for `slug`. Missing, unreadable, or corrupt documents
    /// read as `None`.
    pub async fn load_report(&self, slug: &str) -> Option<AnalysisReport> {
        if check_slug(slug).is_err() {
            return None;
        }
        let path = self.report_path(slug);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read report");
                return None;
            }
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "corrupt report");
            })
            .ok()
    }

    /// Write `report`, replacing any previous report for the same subject.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSlug`] for ids that are not safe file
    /// names, or another [`StoreError`] if the write fails.
    pub async fn save_report(&self, report: &AnalysisReport) -> Result<(), StoreError> {
        check_slug(&report.id)?;
        let bytes = serde_json::to_vec_pretty(report)?;
        write_json(&self.report_path(&report.id), bytes).await
    }

    /// Delete the report for `slug`. A report that does not exist is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSlug`] for unsafe ids, or
    /// [`StoreError::Io`] if the file exists and cannot be removed.
    pub async fn remove_report(&self, slug: &str) -> Result<(), StoreError> {
        check_slug(slug)?;
        let path = self.report_path(slug);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
