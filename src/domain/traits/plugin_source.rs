use std::path::PathBuf;

/// A candidate plugin unit found by a [`PluginSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUnit {
    /// File name, including extension
    pub file_name: String,
    pub path: PathBuf,
}

impl PluginUnit {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
        }
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// Where plugin units are discovered
pub trait PluginSource: Send + Sync {
    fn location(&self) -> String;

    fn exists(&self) -> bool;

    fn list(&self) -> std::io::Result<Vec<PluginUnit>>;

    fn read(&self, unit: &PluginUnit) -> std::io::Result<String>;
}
