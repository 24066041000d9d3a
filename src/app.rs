//! Application state and command coordination

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::config::{AppConfig, OutputConfig, OutputFormat};
use crate::core::store::DocumentStore;
use crate::ui::{listing::ListingView, preview::PreviewView};

/// Main application state
pub struct NotestoreApp {
    /// Application configuration
    pub config: AppConfig,
    /// Where the configuration is saved, if anywhere
    config_path: Option<PathBuf>,
    /// Loaded documents
    pub store: DocumentStore,
}

impl NotestoreApp {
    /// Create a new application instance with an empty store
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            store: DocumentStore::default(),
        }
    }

    /// Override the configured output format
    pub fn set_format(&mut self, format: OutputFormat) {
        self.config.output.format = format;
    }

    /// Load a notes directory and remember it as the last one used
    pub fn open_store(&mut self, path: PathBuf) -> Result<()> {
        self.load_store(&path)?;

        self.config.add_recent_store(path);
        if let Some(config_path) = &self.config_path {
            if let Err(e) = self.config.save_to(config_path) {
                tracing::warn!("Failed to save config: {:#}", e);
            }
        }
        Ok(())
    }

    /// Load the notes directory used last time
    pub fn open_last_store(&mut self) -> Result<()> {
        let path = self
            .config
            .last_store
            .clone()
            .context("No notes directory given and none remembered; pass --dir")?;
        self.load_store(&path)
    }

    fn load_store(&mut self, path: &Path) -> Result<()> {
        self.store = DocumentStore::load(path, &self.config.store)
            .with_context(|| format!("Failed to load notes from {}", path.display()))?;
        Ok(())
    }

    /// Print all document names
    pub fn list(&self, out: &mut impl Write) -> Result<()> {
        if self.store.is_empty() {
            if let Some(root) = self.store.root() {
                tracing::warn!("No documents found under {}", root.display());
            }
        }
        ListingView::write_documents(out, &self.store, self.output().format)
    }

    /// Print a document, or one of its sections
    pub fn show(&self, out: &mut impl Write, name: &str, section: Option<&str>) -> Result<()> {
        match section {
            Some(heading) => {
                let section = self.store.section(name, heading)?;
                PreviewView::write_section(out, section, self.output().format)
            }
            None => {
                let doc = self.store.get(name)?;
                PreviewView::write_document(out, doc, self.output())
            }
        }
    }

    /// Print the section headings of a document
    pub fn sections(&self, out: &mut impl Write, name: &str) -> Result<()> {
        let doc = self.store.get(name)?;
        ListingView::write_headings(out, doc, self.output().format)
    }

    fn output(&self) -> &OutputConfig {
        &self.config.output
    }
}
