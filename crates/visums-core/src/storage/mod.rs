//! # Visums Storage
//!
//! Settings storage: the env-file parser, the lazily loaded [`ConfigStore`],
//! and the [`StorageProvider`] abstraction the store reads files through.
pub mod provider;
pub mod local;
pub mod env_file;
pub mod config;
pub mod error;

/// Re-export key types
pub use provider::StorageProvider;
pub use local::LocalStorageProvider;
pub use env_file::{EnvMap, parse_env_file, parse_env_str};
pub use config::{ConfigFormat, ConfigStore};
pub use error::StorageSystemError;
