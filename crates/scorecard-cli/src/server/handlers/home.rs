//! Upload form and HTML results.

use axum::{
    extract::{Multipart, State},
    response::Html,
};

use super::upload::{analyze_upload, read_upload};
use crate::server::error::ApiError;
use crate::server::page::{render, PageModel};
use crate::server::state::AppState;

/// Show the empty upload form.
pub async fn home() -> Html<String> {
    Html(render(&PageModel::default()))
}

/// Analyze the uploaded file and render every result that could be produced.
pub async fn upload_page(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(message) => {
            return Html(render(&PageModel {
                report: None,
                error: Some(message),
            }));
        }
    };

    match analyze_upload(state.scorecard.clone(), upload).await {
        Ok(report) => Html(render(&PageModel {
            report: Some(&report),
            error: report.combined_issues(" <br> "),
        })),
        Err(e) => {
            log::warn!("upload failed: {}", e);
            let message = match e {
                ApiError::Scorecard(inner) => format!("Error processing file: {}", inner),
                other => format!("Error processing file: {}", other),
            };
            Html(render(&PageModel {
                report: None,
                error: Some(message),
            }))
        }
    }
}
