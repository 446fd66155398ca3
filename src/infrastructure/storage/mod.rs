//! File-based storage implementation

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::traits::StateStore;
use crate::domain::entities::ApplicationState;
use crate::application::errors::StorageError;

/// Application state kept in a single JSON file
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    /// A missing file is a fresh install and loads as empty state
    async fn load(&self) -> Result<ApplicationState, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No state file at {}, starting empty", self.path.display());
                return Ok(ApplicationState::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Write to a sibling temp file, then rename over the old state
    async fn save(&self, state: &ApplicationState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
