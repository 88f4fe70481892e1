use std::fmt::Debug;

use serde_json::{Map, Value};

use crate::kernel::error::Result;

/// One result row: column name to value
pub type Row = Map<String, Value>;

/// The database capability: prepare and run a statement, then read its rows.
///
/// Each `query` replaces the pending result set of the previous one.
pub trait Database: Send + Sync + Debug {
    /// Prepare `sql`, bind `params` positionally and execute it.
    fn query(&self, sql: &str, params: &[Value]) -> Result<()>;

    /// All rows of the last query not yet fetched.
    fn fetch_all(&self) -> Result<Vec<Row>>;

    /// Next row of the last query, `None` once the results are exhausted.
    fn fetch(&self) -> Result<Option<Row>>;
}
