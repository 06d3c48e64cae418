//! Untranslated key detection rule.
//!
//! Finds keys used by pages that exist in the fallback locale but are
//! missing from at least one other loaded locale. Visitors in those
//! languages silently get the fallback text.

use crate::{
    core::{AllLocaleMessages, PageContext},
    issues::UntranslatedIssue,
    rules::helpers::{
        KeyReference, KeyUsageMap, MAX_KEY_USAGES, build_key_usage_map, collect_key_references,
        get_usages_for_key,
    },
};

pub fn check_untranslated_issues(ctx: &PageContext) -> Vec<UntranslatedIssue> {
    let refs: Vec<KeyReference> = ctx
        .parsed_pages()
        .iter()
        .flat_map(collect_key_references)
        .collect();
    let key_usages = build_key_usage_map(&refs);
    check_untranslated(ctx.i18n.fallback_lng(), ctx.i18n.resources(), &key_usages)
}

pub fn check_untranslated(
    fallback_lng: &str,
    all_messages: &AllLocaleMessages,
    key_usages: &KeyUsageMap,
) -> Vec<UntranslatedIssue> {
    let Some(fallback) = all_messages.get(fallback_lng) else {
        return Vec::new();
    };

    let mut issues: Vec<UntranslatedIssue> = key_usages
        .keys()
        .filter_map(|key| {
            let entry = fallback.get(key)?;

            let mut missing_in: Vec<String> = all_messages
                .iter()
                .filter(|(locale, msgs)| *locale != fallback_lng && !msgs.contains_key(key))
                .map(|(locale, _)| locale.clone())
                .collect();
            if missing_in.is_empty() {
                return None;
            }
            missing_in.sort();

            Some(UntranslatedIssue {
                context: entry.clone(),
                fallback_lng: fallback_lng.to_string(),
                missing_in,
                usages: get_usages_for_key(key_usages, key, MAX_KEY_USAGES),
            })
        })
        .collect();

    issues.sort_by(|a, b| {
        a.context
            .location
            .cmp(&b.context.location)
            .then_with(|| a.context.key.cmp(&b.context.key))
    });

    issues
}
