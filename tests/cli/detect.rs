use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_detect_from_lng() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.detect_command();
    cmd.args(["--lng", "zh-tw"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_snapshot!(out.stdout, @r"
    language: zh-TW
    chain: zh-TW -> zh -> en
    source: querystring
    resources: en, zh
    ");

    Ok(())
}

#[test]
fn test_detect_from_query_string() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.detect_command();
    cmd.args(["--lng", "?theme=dark&lng=zh"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("language: zh\n"));
    assert!(out.stdout.contains("source: querystring\n"));

    Ok(())
}

#[test]
fn test_detected_language_is_cached() -> Result<()> {
    let test = CliTest::new()?;

    let mut first = test.detect_command();
    first.args(["--lng", "zh"]);
    assert_eq!(run(first)?.code, Some(0));

    let cache = test.read_file(".i18n-page-cache.json")?;
    let cached: serde_json::Value = serde_json::from_str(&cache)?;
    assert_eq!(cached["lng"], "zh");

    let out = run(test.detect_command())?;
    assert!(out.stdout.contains("language: zh\n"));
    assert!(out.stdout.contains("source: localStorage\n"));

    Ok(())
}

#[test]
fn test_navigator_locale() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.detect_command();
    cmd.env("LANG", "zh_CN.UTF-8");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("language: zh-CN\n"));
    assert!(out.stdout.contains("chain: zh-CN -> zh -> en\n"));
    assert!(out.stdout.contains("source: navigator\n"));

    Ok(())
}

#[test]
fn test_fallback_when_nothing_matches() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18npagerc.json",
        r#"{ "fallbackLng": "zh", "detection": { "order": ["querystring"], "caches": [] } }"#,
    )?;

    let out = run(test.detect_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("language: zh\n"));
    assert!(out.stdout.contains("source: fallback (zh)\n"));
    assert!(!test.root().join(".i18n-page-cache.json").exists());

    Ok(())
}
