use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use super::super::args::TranslateCommand;
use super::{CommandResult, CommandSummary, TranslateSummary, helper::finish};
use crate::{
    core::{PageContext, ParsedPage, TranslateStats, engine::I18n, translate_page},
    issues::Issue,
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = PageContext::with_out_dir(&cmd.common, cmd.out_dir.as_deref())?;
    let out_dir = (!cmd.in_place).then(|| ctx.out_dir());

    let i18n = &ctx.i18n;
    let source_dir = ctx.source_dir.as_path();
    let target = out_dir.as_deref();

    // One document per worker; nothing is shared but the engine.
    let results: Vec<TranslateStats> = ctx
        .parsed_pages()
        .par_iter()
        .map(|page| translate_and_write(page, i18n, source_dir, target))
        .collect::<Result<_>>()?;

    let mut stats = TranslateStats::default();
    for page_stats in &results {
        stats += *page_stats;
    }

    let issues: Vec<Issue> = ctx
        .page_parse_errors()
        .iter()
        .chain(ctx.message_parse_errors())
        .map(|i| Issue::ParseError(i.clone()))
        .collect();

    let summary = CommandSummary::Translate(TranslateSummary {
        language: i18n.language().to_string(),
        pages_written: results.len(),
        out_dir: out_dir.map(|p| p.display().to_string()),
        stats,
    });

    Ok(finish(
        summary,
        issues,
        ctx.files.len(),
        ctx.locale_count(),
        true,
    ))
}

fn translate_and_write(
    page: &ParsedPage,
    i18n: &I18n,
    source_dir: &Path,
    out_dir: Option<&Path>,
) -> Result<TranslateStats> {
    let mut document = page.document.clone();
    let stats = translate_page(&mut document, i18n);

    let target = match out_dir {
        Some(out_dir) => output_path(Path::new(&page.file_path), source_dir, out_dir),
        None => PathBuf::from(&page.file_path),
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&target, document.to_html())
        .with_context(|| format!("Failed to write file: {}", target.display()))?;

    debug!(file = %page.file_path, target = %target.display(), ?stats, "page translated");
    Ok(stats)
}

/// Mirror a page's path below `source_dir` into `out_dir`.
fn output_path(file: &Path, source_dir: &Path, out_dir: &Path) -> PathBuf {
    match file.strip_prefix(source_dir) {
        Ok(rel) => out_dir.join(rel),
        Err(_) => out_dir.join(file.file_name().unwrap_or(file.as_os_str())),
    }
}
