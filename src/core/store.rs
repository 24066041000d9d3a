//! Read-only document store
//!
//! A store is built once from a notes directory (or from already parsed
//! documents) and never changes afterwards. Documents keep their load order,
//! which is the order `list` reports. Lookup is a linear scan.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::config::StoreConfig;
use super::document::Document;
use super::error::{Result, StoreError};
use super::file_system::discover_notes;
use super::sections::Section;

/// In-memory collection of loaded documents
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    root: Option<PathBuf>,
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Load every note found under `root`
    pub fn load(root: &Path, config: &StoreConfig) -> Result<Self> {
        let documents: Vec<Document> = discover_notes(root, config)?
            .into_iter()
            .filter_map(|note| match Document::open(note.name, &note.path) {
                Ok(doc) => Some(doc),
                Err(StoreError::Read { path, source }) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), source);
                    None
                }
                Err(e) => {
                    tracing::warn!("Skipping document: {}", e);
                    None
                }
            })
            .collect();

        let mut store = Self::from_documents(documents)?;
        store.root = Some(root.to_path_buf());

        tracing::info!(
            "Loaded {} documents from {}",
            store.len(),
            root.display()
        );
        Ok(store)
    }

    /// Build a store from parsed documents, keeping their order
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for doc in &documents {
            if let Some(first) = seen.insert(&doc.name, &doc.path) {
                return Err(StoreError::DuplicateName {
                    name: doc.name.clone(),
                    first: first.to_path_buf(),
                    second: doc.path.clone(),
                });
            }
        }

        Ok(Self {
            root: None,
            documents,
        })
    }

    /// Names of all documents in load order
    pub fn list(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.name.as_str()).collect()
    }

    /// Get a document by name
    pub fn get(&self, name: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    /// Get one section of a document by heading
    pub fn section(&self, name: &str, heading: &str) -> Result<&Section> {
        let doc = self.get(name)?;
        doc.section(heading)
            .ok_or_else(|| StoreError::SectionNotFound {
                document: doc.name.clone(),
                heading: heading.to_string(),
            })
    }

    /// Documents in load order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Directory the store was loaded from
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
