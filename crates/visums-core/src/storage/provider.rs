use std::fmt::Debug;
use std::path::Path;
use crate::kernel::error::Result;

/// Trait for storage providers the configuration store reads env files through
pub trait StorageProvider: Send + Sync + Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string. Invalid UTF-8 sequences are replaced, not rejected.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
