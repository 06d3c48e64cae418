use anyhow::{Ok, Result};
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{
    core::PageContext,
    issues::Issue,
    rules::{
        empty_title::check_empty_title_issues, missing_key::check_missing_keys_issues,
        untranslated::check_untranslated_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    MissingKey,
    Untranslated,
    EmptyTitleKey,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::MissingKey,
            CheckRule::Untranslated,
            CheckRule::EmptyTitleKey,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = PageContext::new(&cmd.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks
    };

    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        match check {
            CheckRule::MissingKey => {
                let issues = check_missing_keys_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::MissingKey));
            }
            CheckRule::Untranslated => {
                let issues = check_untranslated_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::Untranslated));
            }
            CheckRule::EmptyTitleKey => {
                let issues = check_empty_title_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::EmptyTitleKey));
            }
        }
    }

    let parse_errors = ctx
        .page_parse_errors()
        .iter()
        .chain(ctx.message_parse_errors());
    all_issues.extend(parse_errors.map(|i| Issue::ParseError(i.clone())));

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.files.len(),
        ctx.locale_count(),
        true,
    ))
}
