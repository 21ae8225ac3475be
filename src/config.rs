//! Service configuration.
//!
//! All runtime behaviour is controlled through [`Settings`], constructed once
//! at process startup (normally via [`Settings::from_env`]) and injected into
//! the request handlers behind an `Arc`. No component reads process-wide
//! environment state after startup: keeping every knob in one struct makes
//! configs trivial to share across tasks, override in tests, and diff between
//! deployments.

use std::fmt;
use std::str::FromStr;

/// Immutable service settings, loaded once at startup.
#[derive(Clone)]
pub struct Settings {
    /// API key for the Anthropic Messages API. Empty means unconfigured;
    /// model calls will fail with `MODEL_FAILURE` at request time.
    pub anthropic_api_key: String,

    /// Model identifier sent to the provider. Default: `claude-3-haiku-20240307`.
    pub anthropic_model: String,

    /// Sampling temperature for the completion. Default: 0.2.
    ///
    /// Low temperature keeps summaries faithful to the source text rather
    /// than creative.
    pub temperature: f32,

    /// Output token ceiling for `short` **and** `medium` summaries. Default: 512.
    ///
    /// Short and medium deliberately share one budget; only `long` gets
    /// [`Self::max_output_tokens_long`].
    pub max_output_tokens_short: u32,

    /// Output token ceiling for `long` summaries. Default: 1024.
    pub max_output_tokens_long: u32,

    /// Generic URL fetch timeout in seconds. Default: 5.
    ///
    /// The active page fetcher uses its own fixed connect/total timeouts
    /// (see [`crate::pipeline::fetch`]); this knob is retained for
    /// compatibility with the original configuration surface.
    pub url_fetch_timeout_secs: u64,

    /// Maximum length, in characters, of text handed to the model. Default: 20 000.
    ///
    /// Checked by the orchestrator before any provider call; oversized input
    /// is rejected with `TEXT_TOO_LONG` and the model is never invoked.
    pub max_text_length: usize,

    /// Maximum accepted PDF upload size in bytes. Default: 5 MiB.
    ///
    /// Inclusive: a payload exactly at the ceiling is accepted, one byte
    /// over is rejected with `FILE_TOO_LARGE`.
    pub max_pdf_size_bytes: usize,

    /// Override for the built-in system prompt. `None` uses
    /// [`crate::prompts::DEFAULT_SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,

    /// TCP port the server binds. Default: 8000.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            anthropic_model: "claude-3-haiku-20240307".to_string(),
            temperature: 0.2,
            max_output_tokens_short: 512,
            max_output_tokens_long: 1024,
            url_fetch_timeout_secs: 5,
            max_text_length: 20_000,
            max_pdf_size_bytes: 5 * 1024 * 1024,
            system_prompt: None,
            port: 8000,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field(
                "anthropic_api_key",
                &if self.anthropic_api_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("anthropic_model", &self.anthropic_model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens_short", &self.max_output_tokens_short)
            .field("max_output_tokens_long", &self.max_output_tokens_long)
            .field("url_fetch_timeout_secs", &self.url_fetch_timeout_secs)
            .field("max_text_length", &self.max_text_length)
            .field("max_pdf_size_bytes", &self.max_pdf_size_bytes)
            .field(
                "system_prompt",
                &self.system_prompt.as_ref().map(|_| "<custom>"),
            )
            .field("port", &self.port)
            .finish()
    }
}

impl Settings {
    /// Build settings from the process environment, falling back to defaults
    /// for anything unset or unparseable.
    ///
    /// Recognised variables: `ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`,
    /// `TEMPERATURE`, `MAX_OUTPUT_TOKENS_SHORT`, `MAX_OUTPUT_TOKENS_LONG`,
    /// `URL_FETCH_TIMEOUT_SECS`, `MAX_TEXT_LENGTH`, `MAX_PDF_SIZE_BYTES`,
    /// `SYSTEM_PROMPT`, `PORT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            anthropic_api_key: env_string("ANTHROPIC_API_KEY")
                .unwrap_or(defaults.anthropic_api_key),
            anthropic_model: env_string("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            temperature: env_parse("TEMPERATURE", defaults.temperature),
            max_output_tokens_short: env_parse(
                "MAX_OUTPUT_TOKENS_SHORT",
                defaults.max_output_tokens_short,
            ),
            max_output_tokens_long: env_parse(
                "MAX_OUTPUT_TOKENS_LONG",
                defaults.max_output_tokens_long,
            ),
            url_fetch_timeout_secs: env_parse(
                "URL_FETCH_TIMEOUT_SECS",
                defaults.url_fetch_timeout_secs,
            ),
            max_text_length: env_parse("MAX_TEXT_LENGTH", defaults.max_text_length),
            max_pdf_size_bytes: env_parse("MAX_PDF_SIZE_BYTES", defaults.max_pdf_size_bytes),
            system_prompt: env_string("SYSTEM_PROMPT"),
            port: env_parse("PORT", defaults.port),
        }
    }
}

/// Read a non-empty string variable; empty and unset are both `None`.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read and parse a variable, keeping `default` when unset or malformed.
fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable environment variable, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert_eq!(s.anthropic_model, "claude-3-haiku-20240307");
        assert_eq!(s.max_output_tokens_short, 512);
        assert_eq!(s.max_output_tokens_long, 1024);
        assert_eq!(s.max_text_length, 20_000);
        assert_eq!(s.max_pdf_size_bytes, 5 * 1024 * 1024);
        assert_eq!(s.port, 8000);
    }

    #[test]
    fn debug_redacts_api_key() {
        let s = Settings {
            anthropic_api_key: "sk-secret".into(),
            ..Settings::default()
        };
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
