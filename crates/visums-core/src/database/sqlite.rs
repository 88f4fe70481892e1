use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;
use rusqlite::types::{Value as SqlValue, ValueRef};
use serde_json::{Number, Value};

use crate::database::dsn::Dsn;
use crate::database::error::DatabaseError;
use crate::database::traits::{Database, Row};
use crate::kernel::component::Component;
use crate::kernel::error::Result;
use crate::storage::ConfigStore;

/// Driver name accepted in the DSN scheme
pub const SQLITE_SCHEME: &str = "sqlite";

/// `db` component backed by SQLite.
///
/// Result rows are read eagerly when a query runs and handed out by
/// `fetch`/`fetch_all` afterwards.
#[derive(Debug)]
pub struct SqliteDatabase {
    dsn: Dsn,
    connection: Mutex<Connection>,
    /// Rows of the last query not yet fetched; `None` before the first query
    /// and after a failed one
    pending: Mutex<Option<VecDeque<Row>>>,
}

impl SqliteDatabase {
    /// Connect using the settings found in the store
    pub fn from_config(config: &ConfigStore) -> Result<Self> {
        let dsn = Dsn::from_config(config)?;
        Self::open(dsn)
    }

    /// Connect to the database a DSN names
    pub fn open(dsn: Dsn) -> Result<Self> {
        if dsn.scheme != SQLITE_SCHEME {
            return Err(DatabaseError::UnsupportedDriver { scheme: dsn.scheme }.into());
        }

        let opened = if dsn.is_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&dsn.database)
        };
        let connection = opened.map_err(|source| DatabaseError::Connection {
            dsn: dsn.to_string(),
            source,
        })?;
        log::info!("Opened SQLite database {}", dsn);

        Ok(Self {
            dsn,
            connection: Mutex::new(connection),
            pending: Mutex::new(None),
        })
    }

    /// Connection settings this component was opened with
    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }

    fn run(&self, sql: &str, params: &[Value]) -> std::result::Result<VecDeque<Row>, DatabaseError> {
        let connection = lock(&self.connection);
        let mut statement = connection
            .prepare(sql)
            .map_err(|source| DatabaseError::QueryPrepare {
                sql: sql.to_string(),
                source,
            })?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let execution = |source: rusqlite::Error| DatabaseError::QueryExecution {
            sql: sql.to_string(),
            source,
        };
        let bound: Vec<SqlValue> = params.iter().map(to_sql).collect();
        let mut rows = statement
            .query(rusqlite::params_from_iter(bound.iter()))
            .map_err(execution)?;

        let mut buffered = VecDeque::new();
        while let Some(row) = rows.next().map_err(execution)? {
            let mut mapped = Row::new();
            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(execution)?;
                mapped.insert(column.clone(), from_sql(value));
            }
            buffered.push_back(mapped);
        }
        Ok(buffered)
    }
}

impl Component for SqliteDatabase {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn as_database(&self) -> Option<&dyn Database> {
        Some(self)
    }

    fn into_database(self: Arc<Self>) -> Option<Arc<dyn Database>> {
        Some(self)
    }
}

impl Database for SqliteDatabase {
    fn query(&self, sql: &str, params: &[Value]) -> Result<()> {
        log::debug!("Running query: {}", sql);
        // A failed statement leaves nothing to fetch.
        *lock(&self.pending) = None;
        let rows = self.run(sql, params)?;
        *lock(&self.pending) = Some(rows);
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Row>> {
        let mut pending = lock(&self.pending);
        let rows = pending.as_mut().ok_or(DatabaseError::NoActiveStatement)?;
        Ok(rows.drain(..).collect())
    }

    fn fetch(&self) -> Result<Option<Row>> {
        let mut pending = lock(&self.pending);
        let rows = pending.as_mut().ok_or(DatabaseError::NoActiveStatement)?;
        Ok(rows.pop_front())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(bytes.to_vec()),
    }
}
