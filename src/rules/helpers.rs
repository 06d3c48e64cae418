//! Helper types and functions for rule implementations.
//!
//! - `KeyReference`: one key an element asks the translator for
//! - `KeyUsageMap`: maps translation keys to the elements using them

use std::collections::HashMap;

use crate::{
    core::{
        ParsedPage, SourceContext, SourceLocation,
        dom::{
            ATTR_KEY, ATTR_ONLY_TITLE, ATTR_PLACEHOLDER, ATTR_PLACEHOLDER_KEY, ATTR_TITLE_KEY,
            Document, Element, HtmlDocument, NodeId,
        },
        translate::placeholder_key,
        utils::line_text,
    },
    issues::KeyAttribute,
};

/// Maximum number of usage locations to include in issues.
pub const MAX_KEY_USAGES: usize = 3;

/// Type alias for key usage map: key -> list of usage locations.
pub type KeyUsageMap = HashMap<String, Vec<SourceContext>>;

/// A key looked up for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    pub key: String,
    pub attribute: KeyAttribute,
    /// `key + "_placeholder"` fallbacks are optional lookups.
    pub derived: bool,
    pub context: SourceContext,
}

/// Location of an element, with its source line for display.
pub fn element_context(page: &ParsedPage, element: &Element) -> SourceContext {
    SourceContext::new(
        SourceLocation::new(&page.file_path, element.line(), element.col()),
        line_text(&page.source, element.line()),
    )
}

/// Elements whose translations reach the output: `data-i18n` present and
/// non-empty, and not inside an element whose content gets replaced.
pub fn translated_elements(page: &ParsedPage) -> Vec<(NodeId, &Element)> {
    let doc = &page.document;
    doc.elements_with_attribute(ATTR_KEY)
        .into_iter()
        .filter_map(|id| doc.element(id).map(|element| (id, element)))
        .filter(|(_, element)| has_key(element))
        .filter(|(id, _)| !doc.ancestors(*id).any(|a| replaces_content(doc, a)))
        .collect()
}

fn has_key(element: &Element) -> bool {
    element.attribute(ATTR_KEY).is_some_and(|k| !k.is_empty())
}

/// Whether the translation pass overwrites the children of `id`.
fn replaces_content(doc: &HtmlDocument, id: NodeId) -> bool {
    doc.accepts_children(id)
        && doc
            .element(id)
            .is_some_and(|e| has_key(e) && e.attribute(ATTR_ONLY_TITLE) != Some("true"))
}

/// Every key the translator would look up for `page`, in tree order.
pub fn collect_key_references(page: &ParsedPage) -> Vec<KeyReference> {
    let doc = &page.document;
    let mut refs = Vec::new();

    for (id, element) in translated_elements(page) {
        let Some(key) = element.attribute(ATTR_KEY) else {
            continue;
        };
        let context = element_context(page, element);

        if element.attribute(ATTR_ONLY_TITLE) != Some("true") {
            refs.push(KeyReference {
                key: key.to_string(),
                attribute: KeyAttribute::Text,
                derived: false,
                context: context.clone(),
            });
        }

        if doc.supports_placeholder(id) && element.attribute(ATTR_PLACEHOLDER).is_some() {
            let explicit = element.attribute(ATTR_PLACEHOLDER_KEY);
            refs.push(KeyReference {
                key: placeholder_key(key, explicit),
                attribute: KeyAttribute::Placeholder,
                derived: explicit.is_none_or(str::is_empty),
                context: context.clone(),
            });
        }

        if let Some(title_key) = element.attribute(ATTR_TITLE_KEY).filter(|k| !k.is_empty()) {
            refs.push(KeyReference {
                key: title_key.to_string(),
                attribute: KeyAttribute::Title,
                derived: false,
                context,
            });
        }
    }

    refs
}

/// Build a map from key to all elements using it, sorted by location.
pub fn build_key_usage_map<'a>(refs: impl IntoIterator<Item = &'a KeyReference>) -> KeyUsageMap {
    let mut map: KeyUsageMap = HashMap::new();

    for r in refs {
        let usages = map.entry(r.key.clone()).or_default();
        if !usages.contains(&r.context) {
            usages.push(r.context.clone());
        }
    }

    for usages in map.values_mut() {
        usages.sort_by(|a, b| a.location.cmp(&b.location));
    }

    map
}

/// Get usages for a key, limited to max_count.
pub fn get_usages_for_key(key_usages: &KeyUsageMap, key: &str, max_count: usize) -> Vec<SourceContext> {
    key_usages
        .get(key)
        .map(|usages| usages.iter().take(max_count).cloned().collect())
        .unwrap_or_default()
}
