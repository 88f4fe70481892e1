use std::sync::Arc;

use serde_json::json;

use crate::database::{DatabaseError, Dsn, SqliteDatabase};
use crate::kernel::error::{Error, Result};

use super::common::TestEnv;

#[test]
fn test_db_component_built_from_discrete_settings() -> Result<()> {
    let env = TestEnv::new("", None);
    let db_path = env.dir.path().join("app.db");
    let base = format!(
        "dbtype=sqlite\ndbuser=app\ndbpassword=secret\ndbhost=localhost\ndbport=0\ndb={}\n",
        db_path.display()
    );
    super::common::write(env.dir.path(), ".env", &base);

    let db = env.app.db()?;
    db.query("CREATE TABLE t (x INTEGER)", &[])?;
    db.query("INSERT INTO t VALUES (?1)", &[json!(7)])?;
    db.query("SELECT x FROM t", &[])?;
    assert_eq!(db.fetch_all()?, vec![json!({ "x": 7 }).as_object().cloned().unwrap()]);

    assert!(db_path.exists());
    Ok(())
}

#[test]
fn test_local_override_switches_database() -> Result<()> {
    let env = TestEnv::new(
        "DSN=sqlite:///nonexistent-dir/never.db\n",
        Some("DSN=sqlite://:memory:\n"),
    );
    let db = env.app.db()?;
    db.query("SELECT 1 AS one", &[])?;
    assert_eq!(db.fetch()?.expect("one row")["one"], json!(1));
    Ok(())
}

#[test]
fn test_incomplete_settings_fail_and_nothing_is_cached() {
    let env = TestEnv::new("dbtype=sqlite\ndbuser=app\n", None);

    match env.app.component("db") {
        Err(Error::Database(DatabaseError::IncompleteConfiguration { missing })) => {
            assert_eq!(missing, vec!["dbpassword", "dbhost", "dbport", "db"]);
        }
        other => panic!("Expected IncompleteConfiguration, got {:?}", other),
    }
    assert!(!env.app.has_component("db"));
}

#[test]
fn test_explicit_component_bypasses_settings() -> Result<()> {
    // No connection settings at all: only the injected component can satisfy `db`.
    let env = TestEnv::new("", None);
    let injected = Arc::new(SqliteDatabase::open(Dsn::parse("sqlite://:memory:").expect("valid DSN"))?);

    env.app.set_component("db", injected.clone())?;

    let resolved = env.app.component("db")?;
    assert!(std::ptr::addr_eq(Arc::as_ptr(&resolved), Arc::as_ptr(&injected)));
    env.app.db()?.query("SELECT 1", &[])?;
    Ok(())
}
