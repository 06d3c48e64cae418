use anyhow::Result;

use super::super::args::DetectCommand;
use super::{CommandResult, CommandSummary, DetectSummary, helper::finish};
use crate::core::PageContext;

pub fn detect(cmd: DetectCommand) -> Result<CommandResult> {
    let ctx = PageContext::new(&cmd.common)?;
    let i18n = &ctx.i18n;

    let mut available: Vec<String> = i18n.resources().keys().cloned().collect();
    available.sort();

    let summary = CommandSummary::Detect(DetectSummary {
        language: i18n.language().to_string(),
        languages: i18n.languages().to_vec(),
        fallback_lng: i18n.fallback_lng().to_string(),
        source: i18n.detected_by(),
        available,
    });

    Ok(finish(summary, Vec::new(), 0, ctx.locale_count(), false))
}
