//! One analysis request, end to end.

use chrono::Utc;
use subscope_core::{AnalysisOutcome, AnalysisRequest};
use subscope_store::JsonStore;

use crate::assembler::ReportAssembler;
use crate::error::PipelineError;
use crate::feed::{resolve_feed_url, FeedClient};

/// Collaborators shared by the CLI and the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub feeds: &'a FeedClient,
    pub assembler: ReportAssembler<'a>,
    pub store: &'a JsonStore,
    pub max_posts: usize,
}

/// Validate `request`, fetch and analyze the feed, then persist the report
/// and the updated subject record.
///
/// Nothing is written unless the feed was fetched and parsed. An existing
/// description is kept when the request does not provide one. If the roster
/// write fails for a subject not yet on the roster, the new report is removed
/// again.
///
/// # Errors
///
/// Returns [`PipelineError::Validation`] for missing fields,
/// [`PipelineError::Analysis`] when the feed cannot be fetched or parsed,
/// and [`PipelineError::Store`] when a write fails.
pub async fn run_subject_analysis(
    ctx: &AnalysisContext<'_>,
    request: &AnalysisRequest,
) -> Result<AnalysisOutcome, PipelineError> {
    let mut subject = request.validate()?;
    subject.feed_url = resolve_feed_url(&subject.feed_url);

    tracing::info!(subject = %subject.id, feed_url = %subject.feed_url, "analyzing subject");

    let posts = ctx
        .feeds
        .fetch_posts(&subject.feed_url, ctx.max_posts)
        .await?;
    let post_count = posts.len();

    let report = ctx.assembler.analyze_neuropsychology(&subject, posts).await;
    let existing = ctx.store.get_subject(&subject.id).await;

    // Report first, then the roster. Concurrent writers are last-writer-wins.
    ctx.store.save_report(&report).await?;

    if subject.description.is_empty() {
        if let Some(existing) = &existing {
            subject.description.clone_from(&existing.description);
        }
    }
    subject.last_analyzed = Some(Utc::now());
    subject.post_count = post_count;

    if let Err(e) = ctx.store.upsert_subject(subject.clone()).await {
        // A first-time report with no roster entry would be unreachable.
        if existing.is_none() {
            if let Err(cleanup) = ctx.store.remove_report(&report.id).await {
                tracing::warn!(subject = %subject.id, error = %cleanup, "failed to remove unlisted report");
            }
        }
        return Err(e.into());
    }

    tracing::info!(subject = %subject.id, post_count, "analysis saved");

    Ok(AnalysisOutcome {
        subject,
        report_id: report.id,
    })
}
