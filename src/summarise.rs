//! Summarisation orchestrator.
//!
//! Takes plain text that has already been acquired (posted directly, fetched
//! from a URL, or extracted from a PDF) and runs the model leg of the
//! pipeline: length check, prompt build, model call, reply parse.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::SummariseError;
use crate::pipeline::model::{self, ModelClient};
use crate::pipeline::parse;
use crate::prompts::{self, DEFAULT_SYSTEM_PROMPT};
use crate::types::{SummaryLength, SummaryMeta, SummaryResponse, Tone};

pub struct Summariser {
    settings: Arc<Settings>,
    model: Arc<dyn ModelClient>,
}

impl Summariser {
    pub fn new(settings: Arc<Settings>, model: Arc<dyn ModelClient>) -> Self {
        Self { settings, model }
    }

    /// Summarise a piece of plain text.
    ///
    /// The length ceiling is enforced here, after acquisition but before the
    /// model is invoked, so an oversized input never costs a provider call.
    /// Length is measured in characters rather than bytes so multibyte text
    /// is not penalised.
    pub async fn summarise(
        &self,
        raw_text: &str,
        length: SummaryLength,
        tone: Tone,
    ) -> Result<SummaryResponse, SummariseError> {
        self.enforce_limit(raw_text)?;

        let system = self
            .settings
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let user = prompts::build_user_prompt(raw_text, length, tone);

        let outcome = model::invoke(self.model.as_ref(), &self.settings, system, &user, length)
            .await?;
        let sections = parse::parse_reply(&outcome.reply.text);

        Ok(SummaryResponse {
            summary_short: sections.summary_short,
            summary_long: sections.summary_long,
            key_points: sections.key_points,
            meta: SummaryMeta {
                input_tokens: outcome.reply.input_tokens,
                output_tokens: outcome.reply.output_tokens,
                processing_time_ms: outcome.elapsed_ms,
            },
            error: None,
        })
    }

    fn enforce_limit(&self, raw_text: &str) -> Result<(), SummariseError> {
        let length = raw_text.chars().count();
        if length > self.settings.max_text_length {
            return Err(SummariseError::TextTooLong {
                length,
                limit: self.settings.max_text_length,
            });
        }
        Ok(())
    }
}
