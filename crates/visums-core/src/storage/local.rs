use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::kernel::error::{Error, Result};
use crate::storage::provider::StorageProvider;

/// Local filesystem storage provider
#[derive(Clone)]
pub struct LocalStorageProvider {
    base_path: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider with the given base path
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Provider rooted at the process working directory
    pub fn current_dir() -> Self {
        Self::new(PathBuf::from("."))
    }

    /// Base directory relative paths are resolved against
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a relative path against the base path. Absolute paths are kept as-is.
    fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.base_path.join(path)
    }
}

impl StorageProvider for LocalStorageProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve_path(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve_path(path);
        let bytes = fs::read(&full_path).map_err(|e| Error::io(e, "read_to_string", full_path.clone()))?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => {
                log::warn!(
                    "{} is not valid UTF-8, invalid bytes replaced",
                    full_path.display()
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

impl fmt::Debug for LocalStorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStorageProvider")
            .field("base_path", &self.base_path)
            .finish()
    }
}
