//! Core functionality for note documents, discovery, the store and configuration

pub mod config;
pub mod document;
pub mod error;
pub mod file_system;
pub mod sections;
pub mod store;
