//! HTTP surface: one endpoint, `POST /summarise`.
//!
//! The endpoint accepts two request shapes on the same path, dispatched by
//! `Content-Type`:
//!
//! * `application/json` — `text` and `url` inputs,
//! * `multipart/form-data` — `pdf` uploads.
//!
//! Everything downstream of acquisition is shared: both paths end in
//! [`Summariser::summarise`].

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::SummariseError;
use crate::pipeline::extract::extract_pdf_text;
use crate::pipeline::fetch;
use crate::pipeline::model::ModelClient;
use crate::summarise::Summariser;
use crate::types::{
    ErrorBody, ErrorInfo, InputType, SummariseRequest, SummaryLength, SummaryResponse, Tone,
};

/// Ceiling for JSON bodies. Generous relative to `max_text_length`; the
/// character limit is what actually bounds accepted text.
const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Slack on top of the configured PDF ceiling so multipart framing overhead
/// does not trip the transport-level limit before our explicit size check.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub summariser: Arc<Summariser>,
    pub fetch_client: reqwest::Client,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, model: Arc<dyn ModelClient>) -> Self {
        let summariser = Arc::new(Summariser::new(settings.clone(), model));
        Self {
            settings,
            summariser,
            fetch_client: fetch::build_client(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.settings.max_pdf_size_bytes + MULTIPART_OVERHEAD;
    Router::new()
        .route("/summarise", post(summarise_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn summarise_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SummaryResponse>, SummariseError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let response = if is_multipart {
        summarise_pdf(&state, request).await?
    } else {
        summarise_json(&state, request).await?
    };
    Ok(Json(response))
}

// ── JSON path: text and url inputs ────────────────────────────────────────

async fn summarise_json(
    state: &AppState,
    request: Request,
) -> Result<SummaryResponse, SummariseError> {
    let bytes = axum::body::to_bytes(request.into_body(), JSON_BODY_LIMIT)
        .await
        .map_err(|_| SummariseError::InvalidJson)?;

    // Two-step parse so "not JSON" and "JSON but wrong shape" report
    // different detail while sharing one wire code.
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| SummariseError::InvalidJson)?;
    let parsed: SummariseRequest =
        serde_json::from_value(value).map_err(|err| SummariseError::InvalidRequest {
            detail: err.to_string(),
        })?;

    let tone = parsed.tone.unwrap_or_default();

    let raw_text = match parsed.input_type {
        InputType::Text => {
            let content = parsed.content.as_deref().unwrap_or("").trim();
            if content.is_empty() {
                return Err(SummariseError::MissingContent {
                    message: "content is required for text input",
                });
            }
            content.to_string()
        }
        InputType::Url => {
            let url = parsed.content.as_deref().unwrap_or("").trim();
            if url.is_empty() {
                return Err(SummariseError::MissingContent {
                    message: "content must carry the URL for url input",
                });
            }
            fetch::fetch_page_text(&state.fetch_client, url)
                .await
                .map_err(|err| {
                    tracing::warn!(url, error = %err, "URL fetch failed");
                    err
                })?
        }
        InputType::Pdf => {
            return Err(SummariseError::InvalidInputType {
                message: "pdf input must be sent as multipart/form-data with a file field",
            });
        }
    };

    state
        .summariser
        .summarise(&raw_text, parsed.length, tone)
        .await
}

// ── Multipart path: pdf uploads ───────────────────────────────────────────

async fn summarise_pdf(
    state: &AppState,
    request: Request,
) -> Result<SummaryResponse, SummariseError> {
    let limit = state.settings.max_pdf_size_bytes;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|err| SummariseError::InvalidRequest {
            detail: err.to_string(),
        })?;

    // Collect raw field values first; enum validation waits until after the
    // input_type gate so a wrong input_type wins over a bad length or tone.
    let mut input_type: Option<String> = None;
    let mut length_raw: Option<String> = None;
    let mut tone_raw: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit))?
    {
        match field.name().unwrap_or("") {
            "input_type" => {
                input_type = Some(field.text().await.map_err(|err| multipart_error(err, limit))?)
            }
            "length" => {
                length_raw = Some(field.text().await.map_err(|err| multipart_error(err, limit))?)
            }
            "tone" => {
                tone_raw = Some(field.text().await.map_err(|err| multipart_error(err, limit))?)
            }
            "file" => {
                let bytes = field.bytes().await.map_err(|err| multipart_error(err, limit))?;
                file = Some(bytes.to_vec());
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    if input_type.as_deref() != Some("pdf") {
        return Err(SummariseError::InvalidInputType {
            message: "multipart requests must set input_type to 'pdf'",
        });
    }
    let length_raw = length_raw.ok_or_else(|| SummariseError::InvalidRequest {
        detail: "length field is required".to_string(),
    })?;
    let length = SummaryLength::from_str(length_raw.trim())
        .map_err(|err| SummariseError::InvalidRequest { detail: err })?;
    // An empty tone field means "use the default".
    let tone = match tone_raw.as_deref().map(str::trim) {
        None | Some("") => Tone::default(),
        Some(raw) => {
            Tone::from_str(raw).map_err(|err| SummariseError::InvalidRequest { detail: err })?
        }
    };

    let bytes = file.ok_or(SummariseError::MissingFile)?;
    if bytes.len() > limit {
        return Err(SummariseError::FileTooLarge { limit });
    }

    let text = extract_pdf_text(bytes).await?;
    if text.is_empty() {
        return Err(SummariseError::MissingContent {
            message: "no extractable text found in PDF",
        });
    }

    state.summariser.summarise(&text, length, tone).await
}

fn multipart_error(err: MultipartError, limit: usize) -> SummariseError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SummariseError::FileTooLarge { limit }
    } else {
        SummariseError::InvalidRequest {
            detail: err.to_string(),
        }
    }
}

// ── Wire encoding of errors ───────────────────────────────────────────────

impl IntoResponse for SummariseError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
