//! Document boundary for the page translator.
//!
//! The translator never sees a concrete tree type. It talks to anything that
//! implements [`Document`]: the in-memory [`HtmlDocument`] used by the CLI,
//! or a lightweight test double.

mod html;

pub use html::{Element, HtmlDocument, NodeId};

/// Attribute carrying the primary translation key.
pub const ATTR_KEY: &str = "data-i18n";
/// Optional override key for the placeholder text.
pub const ATTR_PLACEHOLDER_KEY: &str = "data-i18n-placeholder";
/// Optional key for the `title` attribute.
pub const ATTR_TITLE_KEY: &str = "data-i18n-title";
/// When equal to `"true"`, the element's own text is left alone.
pub const ATTR_ONLY_TITLE: &str = "data-i18n-only-title";

pub const ATTR_PLACEHOLDER: &str = "placeholder";
pub const ATTR_TITLE: &str = "title";

/// A queryable, mutable document tree.
///
/// Node handles are plain `Copy` values so a caller can take a snapshot of
/// matches up front and mutate the tree while walking it.
pub trait Document {
    type NodeId: Copy;

    /// All elements carrying `name`, in tree order.
    ///
    /// The returned list is a snapshot: elements added to the tree afterwards
    /// are not part of it.
    fn elements_with_attribute(&self, name: &str) -> Vec<Self::NodeId>;

    fn attribute(&self, node: Self::NodeId, name: &str) -> Option<&str>;

    fn has_attribute(&self, node: Self::NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn set_attribute(&mut self, node: Self::NodeId, name: &str, value: &str);

    /// Whether the element can hold content. Void elements (`<input>`) can't.
    fn accepts_children(&self, node: Self::NodeId) -> bool;

    /// Replace every child of `node` with a single text node.
    fn set_text_content(&mut self, node: Self::NodeId, text: &str);

    /// Whether the element has a placeholder concept at all (text inputs,
    /// text areas). Plain elements with a stray `placeholder` attribute don't.
    fn supports_placeholder(&self, node: Self::NodeId) -> bool;

    fn set_placeholder(&mut self, node: Self::NodeId, value: &str) {
        self.set_attribute(node, ATTR_PLACEHOLDER, value);
    }
}
