use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use log::debug;

use crate::utils::file_utils;

/// Persists generated text
pub trait ArtifactWriter {
    /// Write `content` to `path`, replacing any previous content
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Writes artifacts to the filesystem
#[derive(Debug, Default)]
pub struct FileSystemWriter {}

impl FileSystemWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl ArtifactWriter for FileSystemWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        debug!("Writing {} bytes to {}", content.len(), path.display());
        file_utils::write_string_to_file(path, content)
    }
}

/// Keeps artifacts in memory, used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryWriter {
    /// Written artifacts by path
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written to `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().ok()?.get(path.as_ref()).cloned()
    }

    /// All written artifacts, sorted by path
    pub fn files(&self) -> Vec<(PathBuf, String)> {
        self.files
            .lock()
            .map(|files| files.iter().map(|(p, c)| (p.clone(), c.clone())).collect())
            .unwrap_or_default()
    }

    /// Number of written artifacts
    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| anyhow!("Artifact store lock poisoned"))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
