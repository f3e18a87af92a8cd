use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed fetch failed for {url}: {reason}")]
    FeedFetch { url: String, reason: String },

    #[error("feed parse failed for {url}: {source}")]
    FeedParse {
        url: String,
        #[source]
        source: feed_rs::parser::ParseFeedError,
    },

    #[error("model extraction failed at {stage}: {reason}")]
    Extraction { stage: &'static str, reason: String },
}

/// Failure of a whole analysis request.
///
/// Extraction failures never reach this type: the assembler recovers from
/// them with the heuristic report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] subscope_core::CoreError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Store(#[from] subscope_store::StoreError),
}
