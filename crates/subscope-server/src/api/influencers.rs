//! Read surfaces over the roster and stored reports.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use subscope_core::{AnalysisReport, Subject};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn list_influencers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Subject>>> {
    let data = state.store.load_roster().await;
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_influencer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    let subject = state
        .store
        .get_subject(&slug)
        .await
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "influencer", &slug))?;
    Ok(Json(ApiResponse {
        data: subject,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let report = state
        .store
        .load_report(&slug)
        .await
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "analysis", &slug))?;
    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
