//! LLM provider client and invocation.
//!
//! ## Why a trait?
//!
//! The summarisation pipeline only needs "system + user prompt in, text and
//! token counts out". Putting that behind [`ModelClient`] keeps the provider
//! swappable and lets tests drive the whole HTTP surface with a stub instead
//! of a network call.
//!
//! [`AnthropicClient`] is the production implementation, speaking the
//! Messages API directly over reqwest.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::error::SummariseError;
use crate::types::SummaryLength;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One completed model call: the raw reply plus provider-reported usage.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("provider reply had no text content")]
    EmptyReply,
}

impl From<ModelError> for SummariseError {
    fn from(err: ModelError) -> Self {
        SummariseError::Model {
            detail: err.to_string(),
        }
    }
}

/// Minimal seam between the pipeline and an LLM provider.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<ModelReply, ModelError>;
}

// ── Anthropic Messages API ────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

/// Production [`ModelClient`] backed by the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base_url(settings, ANTHROPIC_API_BASE)
    }

    /// Alternate endpoint, used by tests pointing at a local stub server.
    pub fn with_base_url(settings: &Settings, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: settings.anthropic_api_key.clone(),
            model: settings.anthropic_model.clone(),
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<ModelReply, ModelError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(ModelError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await.map_err(ModelError::Request)?;

        let text: String = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(ModelError::EmptyReply);
        }

        Ok(ModelReply {
            text,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        })
    }
}

// ── Invocation ────────────────────────────────────────────────────────────

/// A model call plus the wall-clock time it took.
#[derive(Debug)]
pub struct ModelOutcome {
    pub reply: ModelReply,
    pub elapsed_ms: u64,
}

/// Run one summarisation call against the model.
///
/// The output-token ceiling depends on the requested length: `long` gets the
/// larger budget, `short` and `medium` share the smaller one. Elapsed time is
/// measured strictly around the provider call.
pub async fn invoke(
    client: &dyn ModelClient,
    settings: &Settings,
    system: &str,
    user: &str,
    length: SummaryLength,
) -> Result<ModelOutcome, SummariseError> {
    let max_tokens = match length {
        SummaryLength::Long => settings.max_output_tokens_long,
        SummaryLength::Short | SummaryLength::Medium => settings.max_output_tokens_short,
    };

    let started = Instant::now();
    let reply = client
        .complete(system, user, max_tokens, settings.temperature)
        .await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    tracing::debug!(
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        elapsed_ms,
        "model call completed"
    );

    Ok(ModelOutcome { reply, elapsed_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn request_serialises_to_messages_shape() {
        let request = MessagesRequest {
            model: "claude-3-haiku-20240307",
            max_tokens: 512,
            temperature: 0.2,
            system: "sys",
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-3-haiku-20240307");
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn response_tolerates_missing_usage() {
        let parsed: MessagesResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"hi"}]}"#).unwrap();
        assert_eq!(parsed.usage.input_tokens, 0);
        assert_eq!(parsed.content[0].text, "hi");
    }

    #[tokio::test]
    async fn anthropic_client_parses_stub_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 16384];
                let _ = stream.read(&mut buf);
                let body = serde_json::json!({
                    "content": [{"type": "text", "text": "### SHORT SUMMARY\nHi."}],
                    "usage": {"input_tokens": 7, "output_tokens": 3}
                })
                .to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        let settings = Settings::default();
        let client = AnthropicClient::with_base_url(&settings, &format!("http://{addr}"));
        let reply = client.complete("sys", "user", 512, 0.2).await.unwrap();
        assert_eq!(reply.text, "### SHORT SUMMARY\nHi.");
        assert_eq!(reply.input_tokens, 7);
        assert_eq!(reply.output_tokens, 3);
    }

    #[tokio::test]
    async fn api_error_status_is_surfaced() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 16384];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 529 Overloaded\r\nContent-Length: 10\r\nConnection: close\r\n\r\noverloaded",
                );
            }
        });

        let settings = Settings::default();
        let client = AnthropicClient::with_base_url(&settings, &format!("http://{addr}"));
        match client.complete("sys", "user", 512, 0.2).await {
            Err(ModelError::Api { status: 529, body }) => assert_eq!(body, "overloaded"),
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
