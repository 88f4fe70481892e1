//! # Visums Database Component
//!
//! The default implementation behind the `db` component name: the
//! [`Database`] capability trait, connection-string handling ([`Dsn`]) and
//! the SQLite-backed [`SqliteDatabase`].
pub mod traits;
pub mod dsn;
pub mod sqlite;
pub mod error;

pub use traits::{Database, Row};
pub use dsn::Dsn;
pub use sqlite::SqliteDatabase;
pub use error::DatabaseError;
