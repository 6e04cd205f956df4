//! Reading and checking the uploaded score sheet.

use std::sync::Arc;

use axum::extract::Multipart;
use scorecard::{ExamReport, Scorecard, ScorecardError};

use crate::server::error::ApiError;

/// Form field that carries the file.
const FILE_FIELD: &str = "file";

/// Extensions the loader understands.
const ACCEPTED_EXTENSIONS: &[&str] = &[".xlsx", ".xls", ".csv", ".tsv", ".txt"];

pub const MISSING_FILE: &str = "Please choose a file to upload.";
pub const WRONG_EXTENSION: &str = "Please upload an Excel or CSV file (.xlsx, .xls, .csv, .tsv, .txt).";

/// A file received through the form.
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pull the `file` field out of a multipart body and check its name.
///
/// The error is a user-facing message.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, String> {
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(format!("Error processing file: {}", e)),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("Error processing file: {}", e))?;

        upload = Some(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let upload = match upload {
        Some(u) if !u.file_name.is_empty() => u,
        _ => return Err(MISSING_FILE.to_string()),
    };

    let lower = upload.file_name.to_lowercase();
    if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(WRONG_EXTENSION.to_string());
    }

    Ok(upload)
}

/// Run the analysis on the blocking pool.
pub async fn analyze_upload(scorecard: Arc<Scorecard>, upload: Upload) -> Result<ExamReport, ApiError> {
    log::debug!(
        "analyzing upload '{}' ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    tokio::task::spawn_blocking(move || -> Result<ExamReport, ScorecardError> {
        scorecard.analyze_bytes(&upload.bytes, &upload.file_name)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {}", e)))?
    .map_err(ApiError::from)
}
