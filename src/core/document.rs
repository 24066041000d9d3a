//! Note documents loaded from markdown files

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Result, StoreError};
use super::sections::{split_sections, Section};

/// A named note document made of ordered sections
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Identifier, the path relative to the notes directory without extension
    pub name: String,
    /// Source file path
    pub path: PathBuf,
    /// Document metadata (frontmatter)
    pub metadata: DocumentMetadata,
    /// Text before the first heading
    pub preamble: Option<String>,
    /// Sections in source order
    pub sections: Vec<Section>,
}

/// Document metadata from frontmatter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
}

impl Document {
    /// Parse a document from its source text
    pub fn parse(name: impl Into<String>, path: PathBuf, content: &str) -> Self {
        let name = name.into();
        let (metadata, body) = Self::split_frontmatter(content)
            .unwrap_or_else(|| (DocumentMetadata::default(), content));
        let (preamble, sections) = split_sections(body);

        tracing::debug!(
            "Parsed document {} with {} sections",
            name,
            sections.len()
        );

        Self {
            name,
            path,
            metadata,
            preamble,
            sections,
        }
    }

    /// Read and parse a document from a file
    pub fn open(name: impl Into<String>, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(name, path.to_path_buf(), &content))
    }

    /// Get the document title (metadata title or name)
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.name)
    }

    /// Headings of all sections, in order
    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.heading.as_str()).collect()
    }

    /// Find the first section with the given heading
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.matches(heading))
    }

    /// Split leading frontmatter off the content
    ///
    /// The first line must be exactly `---` and the block ends at the next
    /// line that is exactly `---`. A block that does not parse as metadata
    /// is not frontmatter, so a note opening with a thematic break keeps
    /// all of its text.
    fn split_frontmatter(content: &str) -> Option<(DocumentMetadata, &str)> {
        let mut lines = content.split_inclusive('\n');
        let first = lines.next()?;
        if first.trim_end() != "---" {
            return None;
        }

        let start = first.len();
        let mut offset = start;
        for line in lines {
            if line.trim_end() == "---" {
                let metadata = Self::parse_metadata(&content[start..offset])?;
                return Some((metadata, &content[offset + line.len()..]));
            }
            offset += line.len();
        }
        None
    }

    /// Parse a frontmatter block as JSON or simple `key: value` lines
    fn parse_metadata(block: &str) -> Option<DocumentMetadata> {
        let block = block.trim();
        if let Ok(metadata) = serde_json::from_str(block) {
            return Some(metadata);
        }

        let mut metadata = DocumentMetadata::default();
        for line in block.lines().filter(|l| !l.trim().is_empty()) {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty()
                || !key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                tracing::debug!("Not frontmatter, bad key: {}", key);
                return None;
            }

            let value = value.trim().trim_matches('"');
            match key {
                "title" => metadata.title = Some(value.to_string()),
                "tags" => metadata.tags = Self::parse_list(value),
                "aliases" => metadata.aliases = Self::parse_list(value),
                other => tracing::warn!("Ignoring frontmatter key: {}", other),
            }
        }
        Some(metadata)
    }

    fn parse_list(value: &str) -> Vec<String> {
        value
            .trim_matches(|c| c == '[' || c == ']')
            .split(',')
            .map(|s| s.trim().trim_matches('"').to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Document {
        Document::parse("chapter2", PathBuf::from("chapter2.md"), content)
    }

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "Creating and Destroying Objects"
tags: [java, idioms]
---

# Item 1
"#;
        let (metadata, rest) = Document::split_frontmatter(content).unwrap();
        assert_eq!(rest, "\n# Item 1\n");
        assert_eq!(
            metadata.title,
            Some("Creating and Destroying Objects".to_string())
        );
        assert_eq!(metadata.tags, vec!["java", "idioms"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = "---\n{\"title\": \"Chapter 2\", \"aliases\": [\"ch2\"]}\n---\n# Item 1\n";
        let (metadata, _) = Document::split_frontmatter(content).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Chapter 2"));
        assert_eq!(metadata.aliases, vec!["ch2"]);
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn test_frontmatter_is_not_a_section() {
        let doc = parse("---\ntitle: Notes\n---\n\n# Item 1\nbody\n");
        assert_eq!(doc.title(), "Notes");
        assert_eq!(doc.preamble, None);
        assert_eq!(doc.headings(), vec!["Item 1"]);
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let doc = parse("# Item 1\n");
        assert_eq!(doc.title(), "chapter2");
    }

    #[test]
    fn test_section_lookup() {
        let doc = parse("# Singletons\nenum\n\n# Dependency injection\nctor\n");
        assert_eq!(doc.section("dependency injection").unwrap().body, "ctor");
        assert!(doc.section("Builders").is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let err = Document::open("missing", Path::new("/nonexistent/missing.md")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_leading_thematic_break_is_not_frontmatter() {
        let doc = parse("---\n# Item 1: Static factories\nNamed.\n\n---\n\n# Item 2: Builders\nMany.\n");

        assert_eq!(doc.metadata, DocumentMetadata::default());
        assert_eq!(
            doc.headings(),
            vec!["Item 1: Static factories", "Item 2: Builders"]
        );
        assert_eq!(doc.sections[0].body, "Named.\n\n---");
    }

    #[test]
    fn test_frontmatter_delimiter_must_be_whole_line() {
        let doc = parse("---\ntitle: Items 1---2\n---\n# Item 1\nbody\n");

        assert_eq!(doc.metadata.title.as_deref(), Some("Items 1---2"));
        assert_eq!(doc.preamble, None);
        assert_eq!(doc.headings(), vec!["Item 1"]);
    }

    #[test]
    fn test_unclosed_frontmatter_keeps_content() {
        let doc = parse("---\ntitle: Notes\n# Item 1\nbody\n");
        assert_eq!(doc.metadata.title, None);
        assert_eq!(doc.headings(), vec!["Item 1"]);
    }

    #[test]
    fn test_crlf_frontmatter() {
        let doc = parse("---\r\ntitle: Notes\r\n---\r\n# Item 1\r\nbody\r\n");
        assert_eq!(doc.title(), "Notes");
        assert_eq!(doc.headings(), vec!["Item 1"]);
    }
}
