use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, PAGE, run};

#[test]
fn test_translate_writes_out_dir() -> Result<()> {
    let test = CliTest::with_file("index.html", PAGE)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "zh"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Translated 1 page to zh into"));
    assert!(out.stdout.contains("3 elements, 1 text, 1 placeholder, 1 title"));

    let html = test.read_file("dist/index.html")?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<h1 data-i18n="nav.home">首页</h1>"#));
    assert!(html.contains(r#"<input data-i18n="search" placeholder="输入以搜索…">"#));
    assert!(html.contains(r#"data-i18n-only-title="true" title="帮助">?</a>"#));

    // Sources are left alone.
    assert_eq!(test.read_file("index.html")?, PAGE);

    Ok(())
}

#[test]
fn test_untranslated_markup_is_preserved() -> Result<()> {
    let page = concat!(
        "<nav><ul><li><a href=\"/\" title=\"Home&nbsp;page\">&copy; Shop</a>",
        "<li><a href='/help'>Help</a></ul></nav>\n",
        "<p class=\"a\" class=\"b\">1 < 2</p>\n",
        "<h1 data-i18n=\"nav.home\">Home</h1>\n",
    );
    let test = CliTest::with_file("index.html", page)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "zh"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        test.read_file("dist/index.html")?,
        page.replace(">Home</h1>", ">首页</h1>")
    );

    Ok(())
}

#[test]
fn test_translate_mirrors_directories() -> Result<()> {
    let test = CliTest::with_file("docs/guide/intro.html", r#"<p data-i18n="nav.docs"></p>"#)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "en", "--out-dir", "public"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        test.read_file("public/docs/guide/intro.html")?,
        r#"<p data-i18n="nav.docs">Documentation</p>"#
    );

    Ok(())
}

#[test]
fn test_translate_in_place() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<button data-i18n="submit">Go</button>"#)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "zh", "--in-place"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("in place"));
    assert_eq!(
        test.read_file("index.html")?,
        r#"<button data-i18n="submit">提交</button>"#
    );
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_unknown_key_shows_key() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<span data-i18n="no.such.key">x</span>"#)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "zh"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        test.read_file("dist/index.html")?,
        r#"<span data-i18n="no.such.key">no.such.key</span>"#
    );

    Ok(())
}

#[test]
fn test_output_is_not_rescanned() -> Result<()> {
    let test = CliTest::with_file("index.html", PAGE)?;

    for _ in 0..2 {
        let mut cmd = test.translate_command();
        cmd.args(["--lng", "zh"]);
        let out = run(cmd)?;
        assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
        assert!(out.stdout.contains("Translated 1 page"));
    }

    Ok(())
}

#[test]
fn test_messages_root_override() -> Result<()> {
    let test = CliTest::with_file("index.html", r#"<p data-i18n="greeting.hello"></p>"#)?;
    test.write_file("locales/en.json", r#"{"greeting": {"hello": "Hello"}}"#)?;
    test.write_file("locales/fr.json", r#"{"greeting": {"hello": "Bonjour"}}"#)?;

    let mut cmd = test.translate_command();
    cmd.args(["--lng", "fr-CA", "--messages-root", "locales"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(
        test.read_file("dist/index.html")?,
        r#"<p data-i18n="greeting.hello">Bonjour</p>"#
    );

    Ok(())
}

#[test]
fn test_escape_value_is_rejected() -> Result<()> {
    let test = CliTest::with_file("index.html", PAGE)?;
    test.write_file(
        ".i18npagerc.json",
        r#"{ "interpolation": { "escapeValue": true } }"#,
    )?;

    let out = run(test.translate_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("escapeValue"));
    assert!(!test.root().join("dist").exists());

    Ok(())
}
