//! Document output, echoing headings and bodies as plain text or JSON

use std::io::Write;

use anyhow::Result;

use crate::core::config::{OutputConfig, OutputFormat};
use crate::core::document::Document;
use crate::core::sections::Section;

/// Document preview output
pub struct PreviewView;

impl PreviewView {
    /// Write a whole document
    pub fn write_document(out: &mut impl Write, doc: &Document, output: &OutputConfig) -> Result<()> {
        match output.format {
            OutputFormat::Text => {
                let mut first = true;
                if output.show_preamble {
                    if let Some(preamble) = &doc.preamble {
                        writeln!(out, "{}", preamble)?;
                        first = false;
                    }
                }
                for section in &doc.sections {
                    if !first {
                        writeln!(out)?;
                    }
                    Self::write_section_text(out, section)?;
                    first = false;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, doc)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Write a single section
    pub fn write_section(out: &mut impl Write, section: &Section, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => Self::write_section_text(out, section)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, section)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_section_text(out: &mut impl Write, section: &Section) -> Result<()> {
        writeln!(out, "{} {}", "#".repeat(section.level as usize), section.heading)?;
        if !section.body.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", section.body)?;
        }
        Ok(())
    }
}
