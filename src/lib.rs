//! # summarisex
//!
//! A single-endpoint summarisation service. `POST /summarise` accepts raw
//! text, a URL, or an uploaded PDF, reduces it to plain text, asks an LLM
//! for a structured markdown summary, and returns the parsed sections along
//! with token usage and timing.
//!
//! ## Architecture
//!
//! ```text
//! api::router ── summarise_handler
//!     │  json: text | url ──► pipeline::fetch (url only)
//!     │  multipart: pdf  ──► pipeline::extract
//!     ▼
//! summarise::Summariser ──► prompts ──► pipeline::model ──► pipeline::parse
//! ```
//!
//! The provider sits behind [`pipeline::model::ModelClient`], so the whole
//! HTTP surface is testable against a stub.

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod summarise;
pub mod types;

pub use api::{router, AppState};
pub use config::Settings;
pub use error::{FetchError, SummariseError};
pub use summarise::Summariser;
pub use types::{
    ErrorBody, ErrorInfo, InputType, SummariseRequest, SummaryLength, SummaryMeta,
    SummaryResponse, Tone,
};
