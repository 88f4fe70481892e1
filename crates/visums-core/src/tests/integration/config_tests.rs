use crate::kernel::error::Result;
use crate::storage::ConfigFormat;

use super::common::{TestEnv, write};

const BASE: &str = "\
# Application settings
APP_NAME=\"Visums Demo\"   # display name
APP_URL=https://example.test/?a=1&b=2
GREETING='hello # world'
LOG_LEVEL=info
";

const LOCAL: &str = "\
# Developer overrides
LOG_LEVEL=debug
EXTRA=1
";

#[test]
fn test_realistic_files_merge() -> Result<()> {
    let env = TestEnv::new(BASE, Some(LOCAL));
    let datas = env.app.datas()?;

    assert_eq!(datas.len(), 5);
    assert_eq!(datas["APP_NAME"], "Visums Demo");
    assert_eq!(datas["APP_URL"], "https://example.test/?a=1&b=2");
    assert_eq!(datas["GREETING"], "hello # world");
    assert_eq!(datas["LOG_LEVEL"], "debug");
    assert_eq!(datas["EXTRA"], "1");
    Ok(())
}

#[test]
fn test_reload_picks_up_edited_override() -> Result<()> {
    let env = TestEnv::new(BASE, None);
    assert_eq!(env.app.value("LOG_LEVEL")?.as_deref(), Some("info"));

    write(env.dir.path(), ".env.local", "LOG_LEVEL=trace\n");
    assert_eq!(env.app.value("LOG_LEVEL")?.as_deref(), Some("info"));

    env.app.config().reload();
    assert_eq!(env.app.value("LOG_LEVEL")?.as_deref(), Some("trace"));
    Ok(())
}

#[test]
fn test_export_reflects_runtime_values() -> Result<()> {
    let env = TestEnv::new("A=1\n", None);
    env.app.set_value("B", "2");

    let rendered = env.app.config().export(ConfigFormat::Json)?;
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
    assert_eq!(parsed, serde_json::json!({ "A": "1", "B": "2" }));
    Ok(())
}
