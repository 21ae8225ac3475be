//! Prompt templates for the summarisation call.
//!
//! The system prompt pins down the exact reply shape the parser in
//! [`crate::pipeline::parse`] expects: three `###` headings in a fixed order
//! with dash bullet points under the last one. The user prompt carries the
//! per-request knobs (length, tone) plus the content wrapped in explicit
//! start/end markers so the model cannot mistake instructions for content.

use crate::types::{SummaryLength, Tone};

/// Default system prompt, used unless `SUMMARISEX_SYSTEM_PROMPT` overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert summarisation assistant. Given a piece of text, produce a \
summary in exactly the following markdown format, with these three headings \
in this order and nothing before the first heading:

### SHORT SUMMARY
A one or two sentence summary.

### LONG SUMMARY
A few short paragraphs summarising the text at the requested level of detail.

### KEY POINTS
- The most important points of the text, one per line, each starting with \"- \".

Match the requested tone. Do not add headings beyond these three.";

/// Build the user-role prompt for one request.
pub fn build_user_prompt(raw_text: &str, length: SummaryLength, tone: Tone) -> String {
    format!(
        "Summarise the content between the markers below.\n\
         \n\
         - Desired Length: {length}\n\
         - Tone: {tone}\n\
         \n\
         CONTENT START\n\
         {raw_text}\n\
         CONTENT END",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_carries_knobs_and_markers() {
        let prompt = build_user_prompt("the text body", SummaryLength::Long, Tone::Formal);
        assert!(prompt.contains("- Desired Length: long"));
        assert!(prompt.contains("- Tone: formal"));
        assert!(prompt.contains("CONTENT START\nthe text body\nCONTENT END"));
    }

    #[test]
    fn system_prompt_names_all_three_headings() {
        for heading in ["### SHORT SUMMARY", "### LONG SUMMARY", "### KEY POINTS"] {
            assert!(DEFAULT_SYSTEM_PROMPT.contains(heading), "missing {heading}");
        }
    }
}
