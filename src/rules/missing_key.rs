//! Missing translation key detection rule.
//!
//! A key is missing when no locale of the lookup chain defines it, so the
//! page would show the raw key. Derived placeholder keys are optional and
//! never reported.

use crate::{
    core::{PageContext, TranslationContext},
    issues::MissingKeyIssue,
    rules::helpers::{KeyReference, collect_key_references},
};

pub fn check_missing_keys_issues(ctx: &PageContext) -> Vec<MissingKeyIssue> {
    let refs: Vec<KeyReference> = ctx
        .parsed_pages()
        .iter()
        .flat_map(collect_key_references)
        .collect();
    check_missing_keys(&refs, &ctx.i18n)
}

pub fn check_missing_keys<C>(refs: &[KeyReference], translations: &C) -> Vec<MissingKeyIssue>
where
    C: TranslationContext + ?Sized,
{
    refs.iter()
        .filter(|r| !r.derived && !translations.exists(&r.key))
        .map(|r| MissingKeyIssue {
            context: r.context.clone(),
            key: r.key.clone(),
            attribute: r.attribute,
        })
        .collect()
}
