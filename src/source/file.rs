//! Schema source backed by JSON files on disk

use super::traits::SchemaSource;
use crate::schema::EventTypeId;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads `<dir>/<event type id>.json`
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    dir: PathBuf,
}

impl FileSchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, event_type_id: EventTypeId) -> PathBuf {
        self.dir.join(format!("{event_type_id}.json"))
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    async fn fetch_event_type(&self, event_type_id: EventTypeId) -> Result<serde_json::Value> {
        let path = self.path_for(event_type_id);
        tracing::debug!("Reading event type {event_type_id} from {}", path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;

        Ok(value)
    }
}
