use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::errors::CoreError;

use super::traits::ProfileStore;

const EXTENSION: &str = "json";

/// Profile store keeping one `<key>.json` file per key in a directory (native only).
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    /// Use `dir` as the store, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so anything that could escape the directory is rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0'])
        {
            return Err(CoreError::ValidationError(format!(
                "'{key}' cannot be used as a profile key"
            )));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    fn entry_paths(&self) -> Result<Vec<PathBuf>, CoreError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    fn name(&self) -> &str {
        "FileProfileStore"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    async fn save(&self, key: &str, json: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        std::fs::write(&path, json)?;
        debug!("saved profile '{key}' to {}", path.display());
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self
            .entry_paths()?
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        for path in self.entry_paths()? {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
