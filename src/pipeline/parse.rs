//! Parser for the model's three-heading markdown reply.
//!
//! The reply contract (pinned by [`crate::prompts::DEFAULT_SYSTEM_PROMPT`])
//! is three `###` headings in order: `SHORT SUMMARY`, `LONG SUMMARY`,
//! `KEY POINTS`. Models drift, so the parser is deliberately forgiving:
//!
//! * heading match is case-insensitive and ignores surrounding whitespace,
//! * text before the first heading is discarded,
//! * a repeated heading appends to the section already collected,
//! * a missing heading yields an empty section rather than an error.
//!
//! Section text is preserved verbatim: lines accumulate with their internal
//! whitespace and blank lines intact, and only the surrounding whitespace of
//! the finished section is trimmed. Paragraph breaks in the LONG section
//! survive parsing.

/// Section text accumulated from a model reply.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedSections {
    pub summary_short: String,
    pub summary_long: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Short,
    Long,
    Points,
}

const SHORT_HEADING: &str = "### short summary";
const LONG_HEADING: &str = "### long summary";
const POINTS_HEADING: &str = "### key points";

fn heading_for(line: &str) -> Option<Section> {
    let lowered = line.trim().to_ascii_lowercase();
    if lowered.starts_with(SHORT_HEADING) {
        Some(Section::Short)
    } else if lowered.starts_with(LONG_HEADING) {
        Some(Section::Long)
    } else if lowered.starts_with(POINTS_HEADING) {
        Some(Section::Points)
    } else {
        None
    }
}

/// Split a raw model reply into its three sections.
pub fn parse_reply(reply: &str) -> ParsedSections {
    let mut short = String::new();
    let mut long = String::new();
    let mut points_raw = String::new();
    let mut current = Section::None;

    for line in reply.lines() {
        if let Some(section) = heading_for(line) {
            current = section;
            continue;
        }
        let target = match current {
            Section::None => continue,
            Section::Short => &mut short,
            Section::Long => &mut long,
            Section::Points => &mut points_raw,
        };
        target.push_str(line);
        target.push('\n');
    }

    ParsedSections {
        summary_short: short.trim().to_string(),
        summary_long: long.trim().to_string(),
        key_points: split_key_points(&points_raw),
    }
}

/// Turn the raw key-points section into clean strings, one per non-empty
/// line, stripping the leading `- ` bullet marker when present.
fn split_key_points(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .map(|line| line.strip_prefix("- ").unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_reply_splits_into_three_sections() {
        let reply = "### SHORT SUMMARY\nA cache layer.\n\n\
                     ### LONG SUMMARY\nThe document describes a cache layer.\nIt flushes on write.\n\n\
                     ### KEY POINTS\n- build a cache\n- flush buffers\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_short, "A cache layer.");
        assert_eq!(
            parsed.summary_long,
            "The document describes a cache layer.\nIt flushes on write."
        );
        assert_eq!(parsed.key_points, vec!["build a cache", "flush buffers"]);
    }

    #[test]
    fn paragraph_breaks_survive_in_long_section() {
        let reply = "### LONG SUMMARY\nFirst paragraph.\n\nSecond paragraph.\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_long, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn internal_indentation_is_preserved() {
        let reply = "### LONG SUMMARY\nline one\n    indented continuation\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_long, "line one\n    indented continuation");
    }

    #[test]
    fn no_headings_yields_empty_sections() {
        let parsed = parse_reply("just some chatter without any structure");
        assert_eq!(parsed, ParsedSections::default());
    }

    #[test]
    fn preamble_before_first_heading_is_discarded() {
        let reply = "Sure, here is the summary you asked for:\n\
                     ### SHORT SUMMARY\nBrief.\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_short, "Brief.");
        assert!(parsed.summary_long.is_empty());
    }

    #[test]
    fn heading_match_is_case_insensitive() {
        let reply = "### Short Summary\nOne.\n### long summary\nTwo.\n### KEY POINTS\n- three\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_short, "One.");
        assert_eq!(parsed.summary_long, "Two.");
        assert_eq!(parsed.key_points, vec!["three"]);
    }

    #[test]
    fn duplicate_heading_appends_to_existing_section() {
        let reply = "### SHORT SUMMARY\nFirst part.\n\
                     ### LONG SUMMARY\nMiddle.\n\
                     ### SHORT SUMMARY\nSecond part.\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.summary_short, "First part.\nSecond part.");
        assert_eq!(parsed.summary_long, "Middle.");
    }

    #[test]
    fn key_points_keep_lines_without_bullet_prefix() {
        let reply = "### KEY POINTS\n- build a cache\nflush buffers\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.key_points, vec!["build a cache", "flush buffers"]);
    }

    #[test]
    fn blank_lines_between_key_points_are_dropped() {
        let reply = "### KEY POINTS\n\n- one\n\n- two\n\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.key_points, vec!["one", "two"]);
    }
}
