use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["fallbackLng"], "en");
    assert_eq!(parsed["outDir"], "./dist");
    assert_eq!(parsed["messagesRoot"], Value::Null);
    assert_eq!(parsed["interpolation"]["escapeValue"], false);
    assert_eq!(
        parsed["detection"]["order"],
        serde_json::json!(["querystring", "localStorage", "navigator"])
    );

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "\u{2713} Created .i18npagerc.json\n");

    let content = test.read_file(".i18npagerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18npagerc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".i18npagerc.json already exists"));
    assert_eq!(test.read_file(".i18npagerc.json")?, "{}");

    Ok(())
}
