//! Section splitting for note documents
//!
//! Headings are located with pulldown-cmark so that `#` lines inside code
//! fences and headings nested in block quotes or list items never start a
//! section. The shallowest heading level present in a document is the
//! section level; deeper headings stay inside the section body untouched.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A heading and the text that follows it up to the next heading of the same level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text without markup
    pub heading: String,
    /// Heading level (1-6)
    pub level: u8,
    /// Raw source text of the section, excluding its heading
    pub body: String,
}

impl Section {
    /// Whether this section's heading matches `heading`, ignoring case and outer whitespace
    pub fn matches(&self, heading: &str) -> bool {
        self.heading.trim().eq_ignore_ascii_case(heading.trim())
    }
}

/// A heading found in the source with its byte range
#[derive(Debug, Clone)]
struct HeadingBlock {
    level: u8,
    text: String,
    range: Range<usize>,
}

/// Split markdown content into an optional preamble and its top-level sections
pub fn split_sections(content: &str) -> (Option<String>, Vec<Section>) {
    let headings = parse_headings(content);

    let Some(section_level) = headings.iter().map(|h| h.level).min() else {
        return (non_blank(content), Vec::new());
    };

    let tops: Vec<&HeadingBlock> = headings
        .iter()
        .filter(|h| h.level == section_level)
        .collect();

    let preamble = non_blank(&content[..tops[0].range.start]);

    let sections = tops
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = tops
                .get(i + 1)
                .map(|next| next.range.start)
                .unwrap_or(content.len());
            Section {
                heading: heading.text.clone(),
                level: heading.level,
                body: trim_blank_lines(&content[heading.range.end..end]),
            }
        })
        .collect();

    (preamble, sections)
}

/// Collect headings that sit directly in the document, not inside containers
fn parse_headings(content: &str) -> Vec<HeadingBlock> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);

    let mut headings = Vec::new();
    let mut container_depth = 0usize;
    let mut current: Option<(usize, String)> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::BlockQuote(_)) | Event::Start(Tag::Item) => {
                container_depth += 1;
            }
            Event::End(TagEnd::BlockQuote(_)) | Event::End(TagEnd::Item) => {
                container_depth = container_depth.saturating_sub(1);
            }
            Event::Start(Tag::Heading { .. }) if container_depth == 0 => {
                current = Some((range.start, String::new()));
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some((start, text)) = current.take() {
                    headings.push(HeadingBlock {
                        level: level as u8,
                        text: text.trim().to_string(),
                        range: start..range.end,
                    });
                }
            }
            Event::Text(text) | Event::InlineHtml(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::Code(code) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push('`');
                    buf.push_str(&code);
                    buf.push('`');
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Drop leading blank lines and trailing whitespace, keeping indentation of the first line
fn trim_blank_lines(text: &str) -> String {
    let Some(first) = text.find(|c: char| !c.is_whitespace()) else {
        return String::new();
    };
    let line_start = text[..first].rfind('\n').map(|i| i + 1).unwrap_or(0);
    text[line_start..].trim_end().to_string()
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = trim_blank_lines(text);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top_level_sections_in_order() {
        let content = "# Static factories\nPrefer them.\n\n# Builders\nMany parameters.\n";
        let (preamble, sections) = split_sections(content);

        assert_eq!(preamble, None);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Static factories");
        assert_eq!(sections[0].body, "Prefer them.");
        assert_eq!(sections[1].heading, "Builders");
        assert_eq!(sections[1].body, "Many parameters.");
    }

    #[test]
    fn test_deeper_headings_stay_in_body() {
        let content = "# Item 1\nintro\n\n## Advantages\n- named\n\n# Item 2\nnext\n";
        let (_, sections) = split_sections(content);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].body, "intro\n\n## Advantages\n- named");
    }

    #[test]
    fn test_section_level_is_shallowest_present() {
        let content = "## First\none\n### Detail\nmore\n## Second\ntwo\n";
        let (_, sections) = split_sections(content);

        let headings: Vec<_> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["First", "Second"]);
        assert!(sections.iter().all(|s| s.level == 2));
    }

    #[test]
    fn test_hash_lines_in_code_fence_are_not_headings() {
        let content = "# Singleton\n```sh\n# not a heading\n```\n";
        let (_, sections) = split_sections(content);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].body.contains("# not a heading"));
    }

    #[test]
    fn test_heading_in_block_quote_is_ignored() {
        let content = "# Outer\n> # Quoted\n> text\n";
        let (_, sections) = split_sections(content);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Outer");
    }

    #[test]
    fn test_preamble_before_first_heading() {
        let content = "Notes on chapter two.\n\n# Item 1\nbody\n";
        let (preamble, sections) = split_sections(content);

        assert_eq!(preamble.as_deref(), Some("Notes on chapter two."));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_no_headings() {
        let (preamble, sections) = split_sections("just prose\n");
        assert_eq!(preamble.as_deref(), Some("just prose"));
        assert!(sections.is_empty());

        let (preamble, sections) = split_sections("");
        assert_eq!(preamble, None);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_setext_heading_and_inline_code() {
        let content = "Use `Builder`\n=============\n\ntext\n";
        let (_, sections) = split_sections(content);

        assert_eq!(sections[0].heading, "Use `Builder`");
        assert_eq!(sections[0].body, "text");
    }

    #[test]
    fn test_body_keeps_indentation() {
        let content = "# Code\n\n    let x = 1;\n";
        let (_, sections) = split_sections(content);

        assert_eq!(sections[0].body, "    let x = 1;");
    }

    #[test]
    fn test_section_matches_ignores_case() {
        let section = Section {
            heading: "Dependency Injection".to_string(),
            level: 1,
            body: String::new(),
        };
        assert!(section.matches("  dependency injection "));
        assert!(!section.matches("injection"));
    }

    #[test]
    fn test_generic_type_parameters_kept_in_heading() {
        let content = "# Item 26: Don't use raw types like List<E>
Use generics.
";
        let (_, sections) = split_sections(content);

        assert_eq!(sections[0].heading, "Item 26: Don't use raw types like List<E>");
        assert!(sections[0].matches("item 26: don't use raw types like list<e>"));
    }
}
