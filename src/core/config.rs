//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Maximum number of remembered notes directories
const MAX_RECENT_STORES: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Last opened notes directory
    pub last_store: Option<PathBuf>,
    /// Recent notes directories, most recent first
    pub recent_stores: Vec<PathBuf>,
    /// Document discovery settings
    pub store: StoreConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Document discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File extensions treated as notes
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub ignored_dirs: Vec<String>,
    /// Maximum directory depth below the notes directory
    pub max_depth: usize,
    /// Skip files and directories starting with a dot
    pub skip_hidden: bool,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,
    /// Print text found before the first heading
    pub show_preamble: bool,
}

/// How documents and listings are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string(), "txt".to_string()],
            ignored_dirs: vec!["node_modules".to_string(), "target".to_string()],
            max_depth: 10,
            skip_hidden: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_preamble: true,
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "notestore", "Notestore")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to save config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Remember a notes directory as the last used one
    pub fn add_recent_store(&mut self, path: PathBuf) {
        self.last_store = Some(path.clone());
        // Remove if already exists
        self.recent_stores.retain(|p| p != &path);
        // Add to front
        self.recent_stores.insert(0, path);
        self.recent_stores.truncate(MAX_RECENT_STORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.max_depth, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.add_recent_store(PathBuf::from("/notes"));
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output": {"format": "json"}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_preamble);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_recent_stores_dedup_and_truncate() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_store(PathBuf::from(format!("/notes/{i}")));
        }
        config.add_recent_store(PathBuf::from("/notes/5"));

        assert_eq!(config.recent_stores.len(), MAX_RECENT_STORES);
        assert_eq!(config.recent_stores[0], PathBuf::from("/notes/5"));
        assert_eq!(config.last_store, Some(PathBuf::from("/notes/5")));
        assert_eq!(
            config.recent_stores.iter().filter(|p| **p == PathBuf::from("/notes/5")).count(),
            1
        );
    }
}
