//! `POST /api/v1/analyze`: fetch and analyze one subject, then persist the result.

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use subscope_analysis::{run_subject_analysis, AnalysisContext, PipelineError, ReportAssembler};
use subscope_core::{AnalysisOutcome, AnalysisRequest};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

fn map_pipeline_error(request_id: String, error: &PipelineError) -> ApiError {
    match error {
        PipelineError::Validation(e) => ApiError::new(request_id, "validation_error", e.to_string()),
        PipelineError::Analysis(e) => {
            tracing::error!(error = %e, "analysis pipeline failed");
            ApiError::new(request_id, "pipeline_error", e.to_string())
        }
        PipelineError::Store(e) => {
            tracing::error!(error = %e, "failed to persist analysis");
            ApiError::new(request_id, "internal_error", "failed to persist analysis")
        }
    }
}

pub(super) async fn analyze_subject(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisOutcome>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let ctx = AnalysisContext {
        feeds: &state.feeds,
        assembler: ReportAssembler::new(&state.profiles, state.model.as_deref()),
        store: &state.store,
        max_posts: state.max_posts,
    };

    let outcome = run_subject_analysis(&ctx, &request)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
