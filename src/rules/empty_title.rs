//! Empty `data-i18n-title` detection rule.

use crate::{
    core::{ParsedPage, PageContext, dom::ATTR_TITLE_KEY},
    issues::EmptyTitleKeyIssue,
    rules::helpers::{element_context, translated_elements},
};

pub fn check_empty_title_issues(ctx: &PageContext) -> Vec<EmptyTitleKeyIssue> {
    ctx.parsed_pages()
        .iter()
        .flat_map(check_empty_titles)
        .collect()
}

pub fn check_empty_titles(page: &ParsedPage) -> Vec<EmptyTitleKeyIssue> {
    translated_elements(page)
        .into_iter()
        .filter(|(_, element)| element.attribute(ATTR_TITLE_KEY) == Some(""))
        .map(|(_, element)| EmptyTitleKeyIssue {
            context: element_context(page, element),
        })
        .collect()
}
