use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, PAGE, run};

#[test]
fn test_clean_page() -> Result<()> {
    let test = CliTest::with_file("index.html", PAGE)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        out.stdout,
        "\u{2713} Checked 1 page, 2 locales - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_missing_key() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        "<main>\n  <h1 data-i18n=\"app.nope\"></h1>\n</main>\n",
    )?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"app.nope\"  missing-key"));
    assert!(out.stdout.contains("index.html:2:3"));
    assert!(out.stdout.contains("2 |   <h1 data-i18n=\"app.nope\"></h1>"));
    assert!(out.stdout.contains("= note: referenced by data-i18n"));
    assert!(out.stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_missing_title_and_placeholder_override() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        r#"<input data-i18n="search" placeholder="" data-i18n-placeholder="search.hint" data-i18n-title="search.tip">"#,
    )?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("\"search.hint\"  missing-key"));
    assert!(out.stdout.contains("referenced by data-i18n-placeholder"));
    assert!(out.stdout.contains("\"search.tip\"  missing-key"));
    assert!(out.stdout.contains("referenced by data-i18n-title"));

    Ok(())
}

#[test]
fn test_derived_placeholder_key_is_optional() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<input data-i18n="submit" placeholder="x">"#)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);

    Ok(())
}

#[test]
fn test_key_inside_replaced_element_is_ignored() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        r#"<h1 data-i18n="nav.home"><span data-i18n="no.such.key">x</span></h1>"#,
    )?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(!out.stdout.contains("no.such.key"));

    Ok(())
}

#[test]
fn test_untranslated_key() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<p data-i18n="farewell"></p>"#)?;
    test.write_file(
        "locales/en.json",
        "{\n  \"greeting\": \"Hello\",\n  \"farewell\": \"Bye\"\n}\n",
    )?;
    test.write_file("locales/de.json", r#"{"greeting": "Hallo"}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--messages-root", "locales"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("warning: \"farewell\"  untranslated"));
    assert!(out.stdout.contains("en.json:3:1"));
    assert!(out.stdout.contains("(\"Bye\") missing in: de"));
    assert!(out.stdout.contains("used: ./index.html:1:1"));

    Ok(())
}

#[test]
fn test_empty_title_key() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<a data-i18n="help" data-i18n-title="">?</a>"#)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("data-i18n-title is empty"));
    assert!(out.stdout.contains("empty-title-key"));

    Ok(())
}

#[test]
fn test_rule_selection() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        r#"<a data-i18n="nope" data-i18n-title="">?</a>"#,
    )?;

    let mut cmd = test.check_command();
    cmd.arg("empty-title-key");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("empty-title-key"));
    assert!(!out.stdout.contains("missing-key"));

    Ok(())
}

#[test]
fn test_broken_locale_file() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<p data-i18n="a"></p>"#)?;
    test.write_file("locales/en.json", r#"{"a": "A"}"#)?;
    test.write_file("locales/fr.json", "{ not json")?;

    let mut cmd = test.check_command();
    cmd.args(["--messages-root", "locales"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("parse-error"));
    assert!(out.stdout.contains("fr.json"));
    assert!(out.stdout.contains("locale file skipped"));
    assert!(out.stderr.contains("could not be parsed"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18npagerc.json",
        r#"{ "ignores": ["**/drafts/**"] }"#,
    )?;
    test.write_file("drafts/wip.html", r#"<p data-i18n="nope"></p>"#)?;
    test.write_file("index.html", r#"<p data-i18n="nav.home"></p>"#)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(out.stdout.contains("Checked 1 page"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    for command in ["translate", "check", "detect", "init"] {
        assert!(out.stdout.contains(command), "missing {command}");
    }

    Ok(())
}
