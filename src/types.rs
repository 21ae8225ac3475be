//! Wire types for the `/summarise` endpoint.
//!
//! Every type here is request-scoped: nothing outlives a single
//! request/response cycle, and nothing is shared across requests. The enums
//! double as form-field parsers (multipart requests submit their values as
//! plain strings) via [`std::str::FromStr`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source category of the content to summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Raw text submitted in the JSON body.
    Text,
    /// A URL to fetch and strip down to visible text.
    Url,
    /// An uploaded PDF file (multipart requests only).
    Pdf,
}

/// Requested summary verbosity.
///
/// Controls the model's output token ceiling: `long` gets the larger budget,
/// `short` and `medium` share the smaller one (see
/// [`crate::config::Settings::max_output_tokens_short`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            other => Err(format!(
                "unknown length '{other}', expected 'short', 'medium' or 'long'"
            )),
        }
    }
}

/// Requested stylistic register for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Formal,
    Casual,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(Tone::Neutral),
            "formal" => Ok(Tone::Formal),
            "casual" => Ok(Tone::Casual),
            other => Err(format!(
                "unknown tone '{other}', expected 'neutral', 'formal' or 'casual'"
            )),
        }
    }
}

/// JSON request body for text and URL submissions.
///
/// PDF submissions arrive as multipart forms instead and never pass through
/// this type. `content` is nullable at the schema level; the dispatcher
/// rejects empty/whitespace content with `MISSING_CONTENT` after parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct SummariseRequest {
    pub input_type: InputType,
    #[serde(default)]
    pub content: Option<String>,
    pub length: SummaryLength,
    #[serde(default, deserialize_with = "tone_or_none")]
    pub tone: Option<Tone>,
}

/// An absent, null or empty-string tone all mean "use the default"; anything
/// else must parse as a known tone.
fn tone_or_none<'de, D>(deserializer: D) -> Result<Option<Tone>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Usage and latency metadata for one model invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMeta {
    /// Tokens consumed by the prompt, as reported by the provider (0 if unreported).
    pub input_tokens: u64,
    /// Tokens produced by the model, as reported by the provider (0 if unreported).
    pub output_tokens: u64,
    /// Wall-clock duration of the provider call only, in milliseconds.
    pub processing_time_ms: u64,
}

/// Successful response body.
///
/// `error` is always serialised (as `null`) so clients can branch on a single
/// stable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary_short: String,
    pub summary_long: String,
    pub key_points: Vec<String>,
    pub meta: SummaryMeta,
    pub error: Option<ErrorInfo>,
}

/// Machine-readable error payload, mutually exclusive with success fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code, e.g. `TEXT_TOO_LONG`. See [`crate::error::SummariseError::code`].
    pub code: String,
    /// Human-readable description; not intended for programmatic matching.
    pub message: String,
}

/// Error response body: `{ "error": { "code", "message" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserialises_with_defaults() {
        let req: SummariseRequest =
            serde_json::from_str(r#"{"input_type":"text","content":"hi","length":"short"}"#)
                .unwrap();
        assert_eq!(req.input_type, InputType::Text);
        assert_eq!(req.length, SummaryLength::Short);
        assert_eq!(req.tone, None);
        assert_eq!(req.content.as_deref(), Some("hi"));
    }

    #[test]
    fn empty_string_tone_means_default() {
        let req: SummariseRequest = serde_json::from_str(
            r#"{"input_type":"text","content":"hi","length":"short","tone":""}"#,
        )
        .unwrap();
        assert_eq!(req.tone, None);

        let result: Result<SummariseRequest, _> = serde_json::from_str(
            r#"{"input_type":"text","content":"hi","length":"short","tone":"sarcastic"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_unknown_enum_values() {
        let result: Result<SummariseRequest, _> =
            serde_json::from_str(r#"{"input_type":"video","content":"x","length":"short"}"#);
        assert!(result.is_err());

        let result: Result<SummariseRequest, _> =
            serde_json::from_str(r#"{"input_type":"text","content":"x","length":"huge"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn length_and_tone_parse_from_form_strings() {
        assert_eq!("long".parse::<SummaryLength>().unwrap(), SummaryLength::Long);
        assert_eq!("casual".parse::<Tone>().unwrap(), Tone::Casual);
        assert!("LONG".parse::<SummaryLength>().is_err());
        assert!("".parse::<Tone>().is_err());
    }

    #[test]
    fn success_response_serialises_error_as_null() {
        let resp = SummaryResponse {
            summary_short: "s".into(),
            summary_long: "l".into(),
            key_points: vec!["p".into()],
            meta: SummaryMeta {
                input_tokens: 1,
                output_tokens: 2,
                processing_time_ms: 3,
            },
            error: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("error").unwrap().is_null());
    }
}
