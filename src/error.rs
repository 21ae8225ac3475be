//! Error types for the summarisex service.
//!
//! Two distinct error types reflect two distinct layers:
//!
//! * [`SummariseError`] — everything the `/summarise` dispatcher can report
//!   to a client. Each variant maps to exactly one stable wire code and HTTP
//!   status, matched explicitly rather than by string comparison.
//!
//! * [`FetchError`] — the URL fetcher's internal failure kinds. The wire
//!   contract deliberately collapses all of them to one coarse
//!   `URL_FETCH_FAILED` code, but keeping the kinds distinct internally means
//!   logs can still tell a timeout from a 404 from an empty page.

use axum::http::StatusCode;
use thiserror::Error;

/// All errors the `/summarise` endpoint can return to a client.
#[derive(Debug, Error)]
pub enum SummariseError {
    // ── Input validation (400) ────────────────────────────────────────────
    /// Request body was not parseable JSON at all.
    #[error("invalid or missing JSON body")]
    InvalidJson,

    /// JSON parsed but failed schema validation (missing field, unknown enum
    /// value, wrong type), or a malformed multipart form.
    #[error("request validation failed: {detail}")]
    InvalidRequest { detail: String },

    /// `input_type` is not valid for the request shape it arrived in.
    #[error("{message}")]
    InvalidInputType { message: &'static str },

    /// Multipart request without a file part.
    #[error("PDF file is required when input_type is 'pdf'")]
    MissingFile,

    /// Uploaded PDF exceeds the configured byte ceiling.
    #[error("PDF exceeds maximum allowed size of {limit} bytes")]
    FileTooLarge { limit: usize },

    /// No usable content: empty/whitespace JSON content, or a PDF with no
    /// extractable text.
    #[error("{message}")]
    MissingContent { message: &'static str },

    // ── Resource limits (400) ─────────────────────────────────────────────
    /// Extracted text is longer than the configured maximum. Raised by the
    /// orchestrator before any model call.
    #[error("input text exceeds the allowed length ({length} > {limit} characters)")]
    TextTooLong { length: usize, limit: usize },

    // ── Fetch faults (400) ────────────────────────────────────────────────
    /// The URL could not be fetched or yielded no visible text. All fetch
    /// failure modes share one wire code by design.
    #[error("the URL could not be fetched: {0}")]
    Fetch(#[from] FetchError),

    // ── Extraction / provider faults (500) ────────────────────────────────
    /// Corrupt, encrypted, or otherwise unreadable PDF.
    #[error("failed to extract text from PDF: {detail}")]
    Extraction { detail: String },

    /// The LLM provider call failed (network fault, API error, malformed
    /// response).
    #[error("model invocation failed: {detail}")]
    Model { detail: String },

    // ── Catch-all (500) ───────────────────────────────────────────────────
    /// Unclassified internal fault.
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl SummariseError {
    /// The stable machine-readable code reported on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            SummariseError::InvalidJson | SummariseError::InvalidRequest { .. } => "INVALID_INPUT",
            SummariseError::InvalidInputType { .. } => "INVALID_INPUT_TYPE",
            SummariseError::MissingFile => "MISSING_FILE",
            SummariseError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            SummariseError::MissingContent { .. } => "MISSING_CONTENT",
            SummariseError::TextTooLong { .. } => "TEXT_TOO_LONG",
            SummariseError::Fetch(_) => "URL_FETCH_FAILED",
            SummariseError::Extraction { .. } => "EXTRACTION_FAILED",
            SummariseError::Model { .. } => "MODEL_FAILURE",
            SummariseError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// HTTP status associated with this error: 400 for client faults,
    /// 500 for extraction/provider/internal faults.
    pub fn status(&self) -> StatusCode {
        match self {
            SummariseError::InvalidJson
            | SummariseError::InvalidRequest { .. }
            | SummariseError::InvalidInputType { .. }
            | SummariseError::MissingFile
            | SummariseError::FileTooLarge { .. }
            | SummariseError::MissingContent { .. }
            | SummariseError::TextTooLong { .. }
            | SummariseError::Fetch(_) => StatusCode::BAD_REQUEST,
            SummariseError::Extraction { .. }
            | SummariseError::Model { .. }
            | SummariseError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Internal failure kinds of the URL fetcher.
///
/// Collapsed to `URL_FETCH_FAILED` at the response boundary; logged with full
/// detail before collapsing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection-level failure (DNS, refused connection, TLS, protocol).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The connect or total timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The server answered with an error status.
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// The document fetched fine but contained no visible text after
    /// stripping scripts, styles and blank lines.
    #[error("no visible text in fetched document")]
    EmptyDocument,
}
