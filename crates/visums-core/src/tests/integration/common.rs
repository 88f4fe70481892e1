use std::path::Path;

use tempfile::{TempDir, tempdir};

use crate::kernel::bootstrap::Application;
use crate::storage::ConfigStore;

/// Temp directory holding `.env` (and optionally `.env.local`) plus an
/// application reading them.
pub struct TestEnv {
    pub dir: TempDir,
    pub app: Application,
}

impl TestEnv {
    pub fn new(base: &str, local: Option<&str>) -> Self {
        let dir = tempdir().expect("Failed to create temp directory");
        write(dir.path(), ".env", base);
        if let Some(content) = local {
            write(dir.path(), ".env.local", content);
        }
        let config = ConfigStore::with_files(dir.path().join(".env"), dir.path().join(".env.local"));
        Self {
            app: Application::with_config(config),
            dir,
        }
    }
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write env file");
}
