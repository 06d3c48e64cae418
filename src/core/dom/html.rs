use std::{borrow::Cow, fmt::Write as _};

use anyhow::{Context, Result, bail};
use quick_xml::{
    Reader,
    escape::{partial_escape, resolve_html5_entity, unescape_with},
    events::{BytesStart, Event},
};

use super::Document;
use crate::core::utils::{build_line_index, offset_to_line_col};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is kept verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Start tags that end an open `<p>`.
const P_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr",
    "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Handle to a node inside an [`HtmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
    /// Start tag as written in the source. Cleared once an attribute changes.
    start_tag: Option<String>,
    /// End tag as written in the source; `None` when the source left it implied.
    end_tag: Option<String>,
    line: usize,
    col: usize,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute lookup; names compare ASCII case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// 1-based line of the start tag in the parsed source (0 for synthesized elements).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS
            .iter()
            .any(|v| v.eq_ignore_ascii_case(&self.name))
    }

    fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS
            .iter()
            .any(|r| r.eq_ignore_ascii_case(&self.name))
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.start_tag = None;
        match self
            .attributes
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Root,
    Element(Element),
    /// Character data. `raw` holds the source text until the node is rewritten;
    /// otherwise `text` is escaped on output.
    Text { text: String, raw: Option<String> },
    /// Markup written back verbatim (comments, doctype, raw-text bodies).
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory HTML tree.
///
/// Parsing is tolerant: unknown end tags are ignored, unclosed elements are
/// closed by the nearest matching ancestor end tag or by a start tag that
/// implies their end (`<li>`, `<p>`, table cells), void elements never take
/// children, and a `<` that cannot open a tag is text. Untouched nodes are
/// written back exactly as they appeared in the source. Nodes live in an
/// arena and are addressed by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    nodes: Vec<Node>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Result<Self> {
        let line_index = build_line_index(source);
        let mut doc = Self::default();
        let mut stack = vec![ROOT];
        let mut base = 0;
        let mut reader = markup_reader(source);

        loop {
            let offset = base + reader.buffer_position() as usize;
            let (line, col) = offset_to_line_col(source, &line_index, offset);
            let parent = *stack.last().unwrap_or(&ROOT);

            if source
                .get(offset..)
                .is_some_and(|rest| rest.starts_with('<') && !opens_markup(rest))
            {
                doc.append_text(parent, "<", "<");
                base = offset + 1;
                reader = markup_reader(&source[base..]);
                continue;
            }

            let event = reader
                .read_event()
                .with_context(|| format!("Malformed markup at line {}, column {}", line, col))?;
            let end = base + reader.buffer_position() as usize;
            let markup = source.get(offset..end).unwrap_or_default();

            match event {
                Event::Start(start) => {
                    let mut element = read_element(&start, markup, false, line, col)?;
                    doc.close_implied(&mut stack, &element.name);
                    let parent = *stack.last().unwrap_or(&ROOT);

                    if element.is_raw_text() {
                        let rest = &source[end..];
                        let Some((body_end, close)) = find_raw_text_end(rest, &element.name)
                        else {
                            bail!("Unterminated <{}> at line {}", element.name, line);
                        };
                        element.end_tag = Some(rest[body_end..close].to_string());
                        let id = doc.append(parent, NodeKind::Element(element));
                        if body_end > 0 {
                            doc.append(id, NodeKind::Raw(rest[..body_end].to_string()));
                        }
                        base = end + close;
                        reader = markup_reader(&source[base..]);
                    } else if element.is_void() {
                        doc.append(parent, NodeKind::Element(element));
                    } else {
                        let id = doc.append(parent, NodeKind::Element(element));
                        stack.push(id);
                    }
                }
                Event::Empty(start) => {
                    let element = read_element(&start, markup, true, line, col)?;
                    doc.close_implied(&mut stack, &element.name);
                    let parent = *stack.last().unwrap_or(&ROOT);
                    doc.append(parent, NodeKind::Element(element));
                }
                Event::End(end_tag) => {
                    let name = String::from_utf8_lossy(end_tag.name().as_ref()).into_owned();
                    // Close the nearest open element with this name; stray end
                    // tags are dropped.
                    if let Some(pos) = stack.iter().rposition(|id| {
                        doc.element(*id)
                            .is_some_and(|e| e.name.eq_ignore_ascii_case(&name))
                    }) {
                        if let Some(element) = doc.element_mut(stack[pos]) {
                            element.end_tag = Some(markup.to_string());
                        }
                        stack.truncate(pos);
                    }
                }
                Event::Text(text) => {
                    let raw = std::str::from_utf8(&text)
                        .with_context(|| format!("Invalid UTF-8 in text at line {}", line))?;
                    doc.append_text(parent, raw, &decode(raw));
                }
                Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {
                    doc.append(parent, NodeKind::Raw(markup.to_string()));
                }
                Event::Eof => break,
                #[allow(unreachable_patterns)]
                _ => {}
            }
        }

        Ok(doc)
    }

    /// Serialize the tree back to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.nodes[ROOT.0].children {
            self.write_node(*child, &mut out);
        }
        out
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Enclosing elements of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |id| self.parent(*id))
            .filter(|id| self.element(*id).is_some())
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Concatenated text of all descendants, like the DOM's `textContent`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    /// First element with the given `id` attribute.
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(ROOT)
            .into_iter()
            .find(|id| self.element(*id).and_then(|e| e.attribute("id")) == Some(value))
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in &self.nodes[id.0].children {
            match &self.nodes[child.0].kind {
                NodeKind::Text { text, .. } => out.push_str(text),
                NodeKind::Element(_) => self.collect_text(*child, out),
                NodeKind::Root | NodeKind::Raw(_) => {}
            }
        }
    }

    /// Elements below `id` in tree (pre-)order.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut pending: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            if self.element(next).is_some() {
                result.push(next);
                pending.extend(self.nodes[next.0].children.iter().rev().copied());
            }
        }
        result
    }

    /// Pop open elements whose end is implied by a `next` start tag.
    fn close_implied(&self, stack: &mut Vec<NodeId>, next: &str) {
        while let Some(open) = stack.last().and_then(|id| self.element(*id)) {
            if !implies_end(&open.name, next) {
                break;
            }
            stack.pop();
        }
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append source text, joining it with a preceding source text node.
    fn append_text(&mut self, parent: NodeId, raw: &str, decoded: &str) {
        let last = self.nodes[parent.0].children.last().copied();
        if let Some(NodeKind::Text {
            text,
            raw: Some(existing),
        }) = last.map(|id| &mut self.nodes[id.0].kind)
        {
            text.push_str(decoded);
            existing.push_str(raw);
            return;
        }

        self.append(
            parent,
            NodeKind::Text {
                text: decoded.to_string(),
                raw: Some(raw.to_string()),
            },
        );
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Root => {}
            NodeKind::Text { raw: Some(raw), .. } => out.push_str(raw),
            NodeKind::Text { text, raw: None } => out.push_str(&partial_escape(text.as_str())),
            NodeKind::Raw(raw) => out.push_str(raw),
            NodeKind::Element(element) => {
                match &element.start_tag {
                    Some(tag) => out.push_str(tag),
                    None => {
                        let _ = write!(out, "<{}", element.name);
                        for (name, value) in &element.attributes {
                            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
                        }
                        out.push_str(if element.self_closing { "/>" } else { ">" });
                    }
                }

                if element.is_void() || element.self_closing {
                    return;
                }

                for child in &node.children {
                    self.write_node(*child, out);
                }
                if let Some(end_tag) = &element.end_tag {
                    out.push_str(end_tag);
                }
            }
        }
    }
}

impl Document for HtmlDocument {
    type NodeId = NodeId;

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.descendants(ROOT)
            .into_iter()
            .filter(|id| self.has_attribute(*id, name))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.set_attribute(name, value);
        }
    }

    fn accepts_children(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| !e.is_void())
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        if element.is_void() {
            return;
        }
        let raw_text = element.is_raw_text();
        if element.self_closing && !text.is_empty() {
            element.self_closing = false;
            element.start_tag = None;
            element.end_tag = Some(format!("</{}>", element.name));
        }

        // Reuse a lone child of the right kind so repeated passes don't grow
        // the arena.
        let children = &self.nodes[node.0].children;
        if children.len() == 1 {
            let only = children[0];
            match &mut self.nodes[only.0].kind {
                NodeKind::Text { text: existing, raw } if !raw_text => {
                    text.clone_into(existing);
                    *raw = None;
                    return;
                }
                NodeKind::Raw(existing) if raw_text => {
                    text.clone_into(existing);
                    return;
                }
                _ => {}
            }
        }

        self.nodes[node.0].children.clear();
        if !text.is_empty() {
            let kind = if raw_text {
                NodeKind::Raw(text.to_string())
            } else {
                NodeKind::Text {
                    text: text.to_string(),
                    raw: None,
                }
            };
            self.append(node, kind);
        }
    }

    fn supports_placeholder(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| {
            e.name.eq_ignore_ascii_case("input") || e.name.eq_ignore_ascii_case("textarea")
        })
    }
}

fn markup_reader(source: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

/// Whether the `<` starting `rest` opens a tag, comment or declaration.
fn opens_markup(rest: &str) -> bool {
    let mut chars = rest.chars().skip(1);
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('!' | '?') => true,
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Byte range of the end tag closing a raw-text element `name` in `rest`,
/// matched case-insensitively.
fn find_raw_text_end(rest: &str, name: &str) -> Option<(usize, usize)> {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{}", name.to_ascii_lowercase());
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&needle) {
        let start = from + pos;
        let after = start + needle.len();
        match lower[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {
                let close = after + lower[after..].find('>')? + 1;
                return Some((start, close));
            }
            _ => from = after,
        }
    }
    None
}

/// Whether a `next` start tag ends an open `open` element.
fn implies_end(open: &str, next: &str) -> bool {
    let next = next.to_ascii_lowercase();
    match open.to_ascii_lowercase().as_str() {
        "p" => P_CLOSERS.contains(&next.as_str()),
        "li" => next == "li",
        "dt" | "dd" => matches!(next.as_str(), "dt" | "dd"),
        "option" => matches!(next.as_str(), "option" | "optgroup"),
        "tr" => next == "tr",
        "td" | "th" => matches!(next.as_str(), "td" | "th" | "tr"),
        _ => false,
    }
}

/// Decode character references, including HTML named entities. Text that
/// does not decode cleanly is kept as written.
fn decode(raw: &str) -> Cow<'_, str> {
    unescape_with(raw, resolve_html5_entity).unwrap_or(Cow::Borrowed(raw))
}

fn read_element(
    start: &BytesStart<'_>,
    markup: &str,
    self_closing: bool,
    line: usize,
    col: usize,
) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes: Vec<(String, String)> = Vec::new();

    let mut attrs = start.html_attributes();
    attrs.with_checks(false);
    for attr in attrs {
        let attr = attr.with_context(|| format!("Invalid attribute on <{}> at line {}", name, line))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Repeated attributes: the first one wins.
        if attributes.iter().any(|(n, _)| n.eq_ignore_ascii_case(&key)) {
            continue;
        }
        let raw = String::from_utf8_lossy(&attr.value);
        attributes.push((key, decode(&raw).into_owned()));
    }

    Ok(Element {
        name,
        attributes,
        self_closing,
        start_tag: Some(markup.to_string()),
        end_tag: None,
        line,
        col,
    })
}

fn escape_attribute(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}
