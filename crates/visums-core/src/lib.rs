//! # Visums Core
//!
//! Settings loaded lazily from `.env`-style files, and named service
//! components constructed on first use and checked against the capability
//! their name requires.
//!
//! ```no_run
//! use visums_core::Application;
//!
//! # fn main() -> visums_core::Result<()> {
//! let app = Application::new();
//! let dsn = app.value("DSN")?;
//! let db = app.db()?;
//! db.query("SELECT 1 AS one", &[])?;
//! # let _ = dsn;
//! # Ok(())
//! # }
//! ```
pub mod database;
pub mod kernel;
pub mod storage;

pub use kernel::{Application, Capability, Component, ComponentKind, ComponentRegistry};
pub use kernel::error::{Error, Result};
pub use storage::{ConfigFormat, ConfigStore, StorageProvider};
pub use database::{Database, Row};

#[cfg(test)]
mod tests;
