//! Error types for loading and querying the document store

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the requested name was loaded
    #[error("document not found: {name}")]
    NotFound { name: String },

    /// The document exists but has no section with the requested heading
    #[error("section '{heading}' not found in document '{document}'")]
    SectionNotFound { document: String, heading: String },

    /// The notes directory does not exist or is not a directory
    #[error("notes directory does not exist: {}", path.display())]
    MissingRoot { path: PathBuf },

    /// A document file could not be read
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("failed to walk notes directory")]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    /// Two files resolve to the same document name
    #[error("duplicate document name '{name}': {} and {}", first.display(), second.display())]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
