//! # Visums Database Errors
//!
//! Errors raised by the `db` component: while its connection settings are
//! resolved at construction time, and while statements are run.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Incomplete Db configuration: missing {}", .missing.join(", "))]
    IncompleteConfiguration { missing: Vec<String> },

    #[error("Malformed DSN '{dsn}': {reason}")]
    MalformedDsn { dsn: String, reason: String },

    #[error("Unsupported database driver '{scheme}'")]
    UnsupportedDriver { scheme: String },

    #[error("Failed to connect to '{dsn}': {source}")]
    Connection {
        dsn: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query Prepare Error : {sql}")]
    QueryPrepare {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query execution failed for '{sql}': {source}")]
    QueryExecution {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("No query has been run on this connection")]
    NoActiveStatement,
}
