//! Newsletter brand analysis pipeline.
//!
//! Fetches a subject's feed, normalizes each post to plain text, runs the
//! pattern-based extractors over the combined text, and assembles an
//! [`AnalysisReport`](subscope_core::AnalysisReport). When a completion model
//! is configured the extractors are delegated to it, with the heuristic
//! report as the fallback for any failure.

pub mod assembler;
pub mod error;
pub mod extract;
pub mod feed;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use assembler::ReportAssembler;
pub use error::{AnalysisError, PipelineError};
pub use feed::{resolve_feed_url, FeedClient};
pub use model::ModelClient;
pub use normalize::normalize_content;
pub use pipeline::{run_subject_analysis, AnalysisContext};
