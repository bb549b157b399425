use std::io::Write;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::analyze::analyze_file;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::AnalysisReport;

/// Form field carrying the uploaded log.
pub const LOG_FIELD: &str = "log_file";

/// Analyze an uploaded CSV hand history.
///
/// Accepts a `multipart/form-data` form with the export in the `log_file`
/// field, or the raw CSV as the request body. The upload is staged into a
/// temporary file that is removed when the blocking task finishes, whichever
/// way it finishes.
pub async fn analyze_log(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalysisReport>, ApiError> {
    let upload = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        read_log_field(multipart).await?
    } else {
        Bytes::from_request(request, &state)
            .await
            .map_err(|e| upload_error(e.status(), e.body_text()))?
    };

    if upload.is_empty() {
        return Err(ApiError::BadRequest("No file provided".to_string()));
    }

    debug!("Received {} byte upload", upload.len());
    let config = Arc::clone(&state.config);

    let report = tokio::task::spawn_blocking(move || -> Result<AnalysisReport, ApiError> {
        let mut staged = NamedTempFile::new()
            .map_err(|e| ApiError::Internal(format!("Failed to stage upload: {}", e)))?;
        staged
            .write_all(&upload)
            .and_then(|_| staged.flush())
            .map_err(|e| ApiError::Internal(format!("Failed to stage upload: {}", e)))?;

        analyze_file(staged.path(), &config).map_err(|e| {
            warn!("Analysis failed: {}", e);
            ApiError::Internal(e.to_string())
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))??;

    Ok(Json(report))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Pull the `log_file` field out of a form, skipping any other fields.
async fn read_log_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(LOG_FIELD) {
            continue;
        }
        if field.file_name().map_or(true, str::is_empty) {
            return Err(ApiError::BadRequest("No file selected".to_string()));
        }
        return field.bytes().await.map_err(multipart_error);
    }

    Err(ApiError::BadRequest("No file provided".to_string()))
}

fn multipart_error(e: MultipartError) -> ApiError {
    upload_error(e.status(), e.body_text())
}

fn upload_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}
