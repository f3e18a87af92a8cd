//! Analysis command handlers.

use subscope_analysis::run_subject_analysis;
use subscope_core::{AnalysisOutcome, AnalysisRequest, SubjectEntry};

use crate::Services;

fn print_outcome(outcome: &AnalysisOutcome) {
    println!(
        "analyzed {} ({} posts) -> analyses/{}.json",
        outcome.subject.name, outcome.subject.post_count, outcome.report_id
    );
}

/// Analyze one subject given on the command line.
///
/// # Errors
///
/// Returns an error if validation, the feed fetch, or persistence fails.
pub(crate) async fn run_analyze(
    services: &Services,
    name: String,
    feed_url: String,
    description: Option<String>,
) -> anyhow::Result<()> {
    let request = AnalysisRequest {
        name: Some(name),
        feed_url: Some(feed_url),
        description,
    };
    let outcome = run_subject_analysis(&services.context(), &request).await?;
    print_outcome(&outcome);
    Ok(())
}

/// Built-in subjects eligible for batch analysis, optionally narrowed to one
/// slug.
///
/// # Errors
///
/// Returns an error if the filter names an unknown subject or one without a
/// feed URL.
pub(crate) fn select_subjects<'a>(
    services: &'a Services,
    filter: Option<&str>,
) -> anyhow::Result<Vec<&'a SubjectEntry>> {
    if let Some(slug) = filter {
        let entry = services
            .profiles
            .get(slug)
            .ok_or_else(|| anyhow::anyhow!("subject '{slug}' not found"))?;
        if entry.feed_url.is_none() {
            anyhow::bail!("subject '{slug}' has no feed URL configured");
        }
        return Ok(vec![entry]);
    }
    Ok(services
        .profiles
        .entries()
        .map(|(_, entry)| entry)
        .filter(|entry| entry.feed_url.is_some())
        .collect())
}

/// Analyze every eligible built-in subject in slug order.
///
/// Per-subject failures are logged and skipped; the command fails only when
/// every subject failed.
///
/// # Errors
///
/// Returns an error if the filter is invalid or no subject succeeds.
pub(crate) async fn run_batch(services: &Services, filter: Option<&str>) -> anyhow::Result<()> {
    let subjects = select_subjects(services, filter)?;
    if subjects.is_empty() {
        println!("no built-in subjects have a feed URL configured");
        return Ok(());
    }

    let ctx = services.context();
    let mut succeeded = 0_usize;
    let mut failed = 0_usize;

    for entry in &subjects {
        let request = AnalysisRequest {
            name: Some(entry.name.clone()),
            feed_url: entry.feed_url.clone(),
            description: None,
        };
        match run_subject_analysis(&ctx, &request).await {
            Ok(outcome) => {
                succeeded += 1;
                print_outcome(&outcome);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(subject = %entry.name, error = %e, "batch analysis failed");
            }
        }
    }

    println!("batch complete: {succeeded} succeeded, {failed} failed");
    if succeeded == 0 {
        anyhow::bail!("all {failed} subject analyses failed");
    }
    Ok(())
}
