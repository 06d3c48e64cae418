//! The page translation pass.
//!
//! Walks every element carrying `data-i18n` and applies translations to its
//! text content, `placeholder` and `title`. Each element is handled on its
//! own; a missing or empty optional attribute simply skips that update.

use tracing::trace;

use crate::core::dom::{
    ATTR_KEY, ATTR_ONLY_TITLE, ATTR_PLACEHOLDER, ATTR_PLACEHOLDER_KEY, ATTR_TITLE, ATTR_TITLE_KEY,
    Document,
};

/// Suffix appended to the main key when no explicit placeholder key is given.
pub const PLACEHOLDER_KEY_SUFFIX: &str = "_placeholder";

/// Lookup functions the translator needs from a translation engine.
pub trait TranslationContext {
    /// Total lookup; unknown keys yield a fallback string, never an error.
    fn t(&self, key: &str) -> String;

    fn exists(&self, key: &str) -> bool;
}

/// Adapts a pair of closures into a [`TranslationContext`].
///
/// ```
/// use i18n_page::core::{FnContext, TranslationContext};
///
/// let ctx = FnContext::new(|key: &str| key.to_uppercase(), |_: &str| true);
/// assert_eq!(ctx.t("hi"), "HI");
/// ```
pub struct FnContext<T, E> {
    translate: T,
    exists: E,
}

impl<T, E> FnContext<T, E>
where
    T: Fn(&str) -> String,
    E: Fn(&str) -> bool,
{
    pub fn new(translate: T, exists: E) -> Self {
        Self { translate, exists }
    }
}

impl<T, E> TranslationContext for FnContext<T, E>
where
    T: Fn(&str) -> String,
    E: Fn(&str) -> bool,
{
    fn t(&self, key: &str) -> String {
        (self.translate)(key)
    }

    fn exists(&self, key: &str) -> bool {
        (self.exists)(key)
    }
}

/// What a single pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslateStats {
    /// Elements carrying a non-empty primary key.
    pub elements: usize,
    /// Elements whose content was replaced.
    pub texts: usize,
    pub placeholders: usize,
    pub titles: usize,
}

impl std::ops::AddAssign for TranslateStats {
    fn add_assign(&mut self, other: Self) {
        self.elements += other.elements;
        self.texts += other.texts;
        self.placeholders += other.placeholders;
        self.titles += other.titles;
    }
}

/// The placeholder key for an element: the explicit override when set,
/// otherwise `key + "_placeholder"`. The derived key is not checked here.
pub fn placeholder_key(key: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => format!("{}{}", key, PLACEHOLDER_KEY_SUFFIX),
    }
}

/// Translate every `data-i18n` element of `doc` in place.
///
/// The match set is captured before the first mutation. Running the pass
/// twice with the same context leaves the document as one pass does.
pub fn translate_page<D, C>(doc: &mut D, ctx: &C) -> TranslateStats
where
    D: Document,
    C: TranslationContext + ?Sized,
{
    let mut stats = TranslateStats::default();

    for node in doc.elements_with_attribute(ATTR_KEY) {
        let Some(key) = doc
            .attribute(node, ATTR_KEY)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        stats.elements += 1;

        let translation = ctx.t(&key);

        if doc.supports_placeholder(node) && doc.has_attribute(node, ATTR_PLACEHOLDER) {
            let placeholder_key = placeholder_key(&key, doc.attribute(node, ATTR_PLACEHOLDER_KEY));
            if ctx.exists(&placeholder_key) {
                let value = ctx.t(&placeholder_key);
                doc.set_placeholder(node, &value);
                stats.placeholders += 1;
            } else {
                trace!(key = %placeholder_key, "placeholder key not found, keeping source text");
            }
        }

        if let Some(title_key) = doc
            .attribute(node, ATTR_TITLE_KEY)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
        {
            let value = ctx.t(&title_key);
            doc.set_attribute(node, ATTR_TITLE, &value);
            stats.titles += 1;
        }

        if doc.attribute(node, ATTR_ONLY_TITLE) != Some("true") && doc.accepts_children(node) {
            doc.set_text_content(node, &translation);
            stats.texts += 1;
        }
    }

    stats
}
