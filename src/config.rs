//! Configuration handling for comment forms

use crate::schema::{DuplicateKeyPolicy, SchemaParser};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log filter when neither the config nor `RUST_LOG` set one
pub const DEFAULT_LOG_FILTER: &str = "comment_forms=info";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    /// How to treat fields whose names map to the same attribute key
    pub duplicate_key_policy: Option<DuplicateKeyPolicy>,
    /// Directory holding `<event type id>.json` files
    pub schema_dir: Option<PathBuf>,
    /// Tracing filter directive
    pub log_filter: Option<String>,
}

impl FormsConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "samedi", "comment-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Schema parser set up with the configured policy
    pub fn parser(&self) -> SchemaParser {
        SchemaParser::new(self.duplicate_key_policy.unwrap_or_default())
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn schema_dir(&self) -> PathBuf {
        self.schema_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
