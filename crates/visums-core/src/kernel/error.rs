//! # Visums Kernel Errors
//!
//! Defines the top-level error type of `visums-core`.
//!
//! Each subsystem owns a typed error enum ([`StorageSystemError`],
//! [`ComponentError`], [`DatabaseError`]); the kernel [`Error`] wraps all of
//! them so callers can propagate any failure with `?` and still match on the
//! specific cause.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::database::error::DatabaseError;
use crate::kernel::component::ComponentError;
use crate::storage::error::StorageSystemError;

/// Custom error type for Visums
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration file access, export and persistence errors
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Component resolution and capability errors
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Errors raised by the database component
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wrap an I/O failure with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Marker for declared-but-unbuilt operations.
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Error::StorageSystem(StorageSystemError::NotImplemented {
            operation: operation.into(),
        })
    }

    /// True when the error is a missing or unreadable configuration file.
    pub fn is_file_access(&self) -> bool {
        matches!(self, Error::StorageSystem(StorageSystemError::Io { .. }))
    }

    /// True when a component was rejected for not exposing its capability.
    pub fn is_capability_mismatch(&self) -> bool {
        matches!(
            self,
            Error::Component(ComponentError::CapabilityMismatch { .. })
        )
    }

    /// True for the explicit "not implemented" marker.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            Error::StorageSystem(StorageSystemError::NotImplemented { .. })
        )
    }
}
