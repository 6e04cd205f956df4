//! JSON analysis endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use scorecard::ExamReport;

use super::upload::{analyze_upload, read_upload};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Analyze an uploaded file and return the full report.
pub async fn analyze_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExamReport>, ApiError> {
    let upload = read_upload(multipart).await.map_err(ApiError::BadRequest)?;
    let report = analyze_upload(state.scorecard.clone(), upload).await?;
    Ok(Json(report))
}
