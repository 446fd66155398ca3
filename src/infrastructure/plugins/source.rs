//! Directory-backed plugin source

use std::path::PathBuf;

use crate::domain::traits::{PluginSource, PluginUnit};

/// Plugin units are the regular files of one directory
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PluginSource for DirectorySource {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    fn list(&self) -> std::io::Result<Vec<PluginUnit>> {
        let mut units = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name: {}", path.display());
                continue;
            };
            units.push(PluginUnit::new(name, path.clone()));
        }
        Ok(units)
    }

    fn read(&self, unit: &PluginUnit) -> std::io::Result<String> {
        std::fs::read_to_string(&unit.path)
    }
}
