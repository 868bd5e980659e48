use std::io;

use axum::Json;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::domain::{StemName, StemSet};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct SeparateResponse {
    pub stems: StemUrls,
}

#[derive(Debug, Serialize)]
pub struct StemUrls {
    pub kick: String,
    pub drums: String,
    pub bass: String,
    pub vocals: String,
    pub other: String,
}

impl From<&StemSet> for StemUrls {
    fn from(stems: &StemSet) -> Self {
        Self {
            kick: stems.url(StemName::Kick),
            drums: stems.url(StemName::Drums),
            bass: stems.url(StemName::Bass),
            vocals: stems.url(StemName::Vocals),
            other: stems.url(StemName::Other),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            detail: None,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn separate_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "Separation request is not multipart");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                return separate_upload(&state, field).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Separation request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    e.status(),
                    format!("Failed to read multipart: {}", e.body_text()),
                );
            }
        }
    }
}

async fn separate_upload(state: &AppState, field: Field<'_>) -> Response {
    let filename = match field.file_name() {
        None => return error_response(StatusCode::BAD_REQUEST, "No file uploaded"),
        Some("") => return error_response(StatusCode::BAD_REQUEST, "Empty filename"),
        Some(name) => name.to_string(),
    };

    let workspace = match state.separation_service.start_job().await {
        Ok(w) => w,
        Err(e) => {
            tracing::error!(error = %e, "Failed to allocate job workspace");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };
    let job_id = workspace.job_id();

    let stream = field.map_err(io::Error::other).boxed();
    let size = match state.separation_service.store_upload(&workspace, stream).await {
        Ok(size) => size,
        Err(e) => {
            tracing::warn!(job_id = %job_id, error = %e, "Failed to store upload");
            state.separation_service.abandon(workspace).await;
            return error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e));
        }
    };

    if size == 0 {
        tracing::warn!(job_id = %job_id, filename = %filename, "Uploaded file is empty");
        state.separation_service.abandon(workspace).await;
        return error_response(StatusCode::BAD_REQUEST, "Uploaded file is empty");
    }

    tracing::info!(
        job_id = %job_id,
        filename = %filename,
        bytes = size,
        "Upload stored, starting separation"
    );

    match state.separation_service.run(workspace).await {
        Ok(stems) => (
            StatusCode::OK,
            Json(SeparateResponse {
                stems: StemUrls::from(&stems),
            }),
        )
            .into_response(),
        Err(e) => match e.tool_diagnostics() {
            Some(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Stem separation failed".to_string(),
                    detail: Some(detail.to_string()),
                }),
            )
                .into_response(),
            None => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
    }
}
