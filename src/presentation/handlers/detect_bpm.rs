use std::io;

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use futures::{StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::application::ports::ScratchFile;
use crate::application::services::{BpmService, DetectionError};
use crate::presentation::handlers::separate::ErrorResponse;
use crate::presentation::state::AppState;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmResponse {
    pub bpm: u32,
    pub beat_offset: f64,
}

/// Detection failed; the tempo fields carry the configured fallback.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmErrorResponse {
    pub error: String,
    pub bpm: u32,
    pub beat_offset: f64,
}

#[derive(Debug, Deserialize)]
struct PathForm {
    path: Option<String>,
}

enum BpmSource {
    Upload(Box<dyn ScratchFile>),
    Reference(String),
}

/// Accepts a multipart `file` or `path`, or a urlencoded `path`.
#[tracing::instrument(skip(state, request))]
pub async fn detect_bpm_handler(State(state): State<AppState>, request: Request) -> Response {
    let urlencoded = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with(FORM_URLENCODED));

    let source = if urlencoded {
        match Form::<PathForm>::from_request(request, &state).await {
            Ok(Form(form)) => Ok(form.path.map(BpmSource::Reference)),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed form body");
                return missing_input();
            }
        }
    } else {
        match Multipart::from_request(request, &state).await {
            Ok(mut multipart) => read_source(&state.bpm_service, &mut multipart).await,
            Err(e) => {
                tracing::warn!(error = %e, "Tempo detection request is not a form");
                return missing_input();
            }
        }
    };

    let source = match source {
        Ok(Some(source)) => source,
        Ok(None) => return missing_input(),
        Err(e) => return degraded(&state.bpm_service, e),
    };

    // The upload must outlive detection; dropping it deletes the temporary file.
    let (path, _upload) = match source {
        BpmSource::Upload(upload) => {
            tracing::debug!(bytes = upload.size_bytes(), "Tempo detection on uploaded file");
            (upload.path().to_path_buf(), Some(upload))
        }
        BpmSource::Reference(relative) => {
            match state.bpm_service.resolve_reference(&relative) {
                Ok(path) => (path, None),
                Err(e) => return degraded(&state.bpm_service, e),
            }
        }
    };

    match state.bpm_service.detect(path).await {
        Ok(result) => (
            StatusCode::OK,
            Json(BpmResponse {
                bpm: result.bpm,
                beat_offset: result.beat_offset,
            }),
        )
            .into_response(),
        Err(e) => degraded(&state.bpm_service, e),
    }
}

/// An uploaded `file` wins over a `path` reference.
async fn read_source(
    service: &BpmService,
    multipart: &mut Multipart,
) -> Result<Option<BpmSource>, DetectionError> {
    let mut reference = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DetectionError::Upload(io::Error::other(e)))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let stream = field.map_err(io::Error::other).boxed();
                let upload = service.receive_upload(stream).await?;
                return Ok(Some(BpmSource::Upload(upload)));
            }
            Some("path") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| DetectionError::Upload(io::Error::other(e)))?;
                reference = Some(text);
            }
            _ => {}
        }
    }

    Ok(reference.map(BpmSource::Reference))
}

fn missing_input() -> Response {
    tracing::warn!("Tempo detection request without file or path");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "No file or path provided".to_string(),
            detail: None,
        }),
    )
        .into_response()
}

fn degraded(service: &BpmService, error: DetectionError) -> Response {
    tracing::warn!(error = %error, "Tempo detection failed, returning fallback");
    let fallback = service.fallback();
    (
        StatusCode::OK,
        Json(BpmErrorResponse {
            error: error.to_string(),
            bpm: fallback.bpm,
            beat_offset: fallback.beat_offset,
        }),
    )
        .into_response()
}
