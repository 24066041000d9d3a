//! Listings of documents and section headings

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::core::config::OutputFormat;
use crate::core::document::Document;
use crate::core::store::DocumentStore;

/// One row of a JSON document listing
#[derive(Debug, Serialize)]
struct DocumentSummary<'a> {
    name: &'a str,
    title: &'a str,
    sections: usize,
}

/// Listing output
pub struct ListingView;

impl ListingView {
    /// Write all document names in load order
    pub fn write_documents(
        out: &mut impl Write,
        store: &DocumentStore,
        format: OutputFormat,
    ) -> Result<()> {
        match format {
            OutputFormat::Text => {
                for name in store.list() {
                    writeln!(out, "{}", name)?;
                }
            }
            OutputFormat::Json => {
                let summaries: Vec<_> = store
                    .iter()
                    .map(|doc| DocumentSummary {
                        name: &doc.name,
                        title: doc.title(),
                        sections: doc.sections.len(),
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &summaries)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Write the section headings of a document
    pub fn write_headings(out: &mut impl Write, doc: &Document, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                for section in &doc.sections {
                    writeln!(out, "{} {}", "#".repeat(section.level as usize), section.heading)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &doc.headings())?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
