//! HTML tree model and parser adapter.
//!
//! Parsing is delegated to `dom_query` (html5ever). The adapter flattens the
//! parsed `<body>` into owned [`HtmlNode`] values so the rest of the pipeline
//! can rewrite the tree freely without touching the DOM arena.

use std::collections::BTreeMap;
use std::fmt;

use dom_query::{Document, NodeRef};
use serde::{Deserialize, Serialize};

use crate::options::DEFAULT_MAX_DEPTH;

/// Kind of an [`HtmlNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Element node; `name` is required.
    Tag,
    /// Text node; `content` holds the raw text.
    Text,
    /// HTML comment; never produced by [`parse`].
    Comment,
    /// Anything else a foreign parser may produce (doctype, directive, ...).
    #[serde(other)]
    Other,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element or text unit of a parsed HTML tree.
///
/// `children` distinguishes "absent" (`None`) from "empty" so trees built by
/// other parsers survive a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlNode {
    /// Node type, serialized as `type`.
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Lowercase tag name of an element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Element attributes by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Raw text of a text or comment node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<HtmlNode>>,
}

impl HtmlNode {
    /// Element node with no attributes and an empty child list.
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Tag,
            name: Some(name.into()),
            attrs: BTreeMap::new(),
            content: None,
            children: Some(Vec::new()),
        }
    }

    /// Text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text,
            name: None,
            attrs: BTreeMap::new(),
            content: Some(content.into()),
            children: None,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<HtmlNode>) -> Self {
        self.children = Some(children);
        self
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// True for an element with the given tag name.
    #[must_use]
    pub fn is_element(&self, name: &str) -> bool {
        self.node_type == NodeType::Tag && self.name.as_deref() == Some(name)
    }

    /// Children as a slice; absent children read as empty.
    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Short label for diagnostics: `<a>`, `#text`, `#comment`.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.node_type, self.name.as_deref()) {
            (NodeType::Tag, Some(name)) => format!("<{name}>"),
            (node_type, _) => format!("#{node_type}"),
        }
    }
}

/// Parse an HTML string into the top-level nodes of its `<body>`.
///
/// Only element and text nodes are kept. Comments, doctypes and processing
/// instructions carry nothing the converter can represent. Table row groups
/// (`thead`, `tbody`, `tfoot`) are spliced into their table. Nesting is cut
/// one level below [`DEFAULT_MAX_DEPTH`]; see [`parse_with_max_depth`].
#[must_use]
pub fn parse(html: &str) -> Vec<HtmlNode> {
    parse_with_max_depth(html, DEFAULT_MAX_DEPTH)
}

/// Same as [`parse`] with an explicit depth limit.
///
/// Top-level nodes are at depth 1. Nodes at `max_depth + 1` are kept without
/// children so the transformer can report them; nothing deeper is copied.
#[must_use]
pub fn parse_with_max_depth(html: &str, max_depth: usize) -> Vec<HtmlNode> {
    let doc = Document::from(html);
    let body = doc.select("body");
    let Some(body_node) = body.nodes().first() else {
        return Vec::new();
    };
    collect_children(body_node, 1, max_depth)
}

/// Drops a tree without recursing, so arbitrarily deep input is released safely.
pub(crate) fn release(nodes: Vec<HtmlNode>) {
    let mut stack = nodes;
    while let Some(mut node) = stack.pop() {
        if let Some(children) = node.children.take() {
            stack.extend(children);
        }
    }
}

/// Row-group wrappers spliced into their table.
///
/// html5ever inserts an implicit `<tbody>` into every table; splicing keeps
/// rows as direct table children, the way the source markup reads.
const TABLE_SECTIONS: [&str; 3] = ["thead", "tbody", "tfoot"];

/// Children of `parent`, which sit at `depth`.
fn collect_children(parent: &NodeRef, depth: usize, max_depth: usize) -> Vec<HtmlNode> {
    let in_table = parent
        .node_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("table"));

    let mut out = Vec::new();
    for child in parent.children() {
        let Some(node) = convert_node(&child, depth, max_depth) else {
            continue;
        };
        let is_section = node
            .name
            .as_deref()
            .is_some_and(|name| TABLE_SECTIONS.contains(&name));
        if in_table && is_section {
            out.extend(node.children.unwrap_or_default());
        } else {
            out.push(node);
        }
    }
    out
}

fn convert_node(node: &NodeRef, depth: usize, max_depth: usize) -> Option<HtmlNode> {
    if node.is_text() {
        return Some(HtmlNode::text(node.text().to_string()));
    }
    if !node.is_element() {
        return None;
    }

    let name = node.node_name()?.to_ascii_lowercase();
    let attrs = node
        .attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect();

    // Spliced table sections hand their rows up a level.
    let (child_depth, cut) = if TABLE_SECTIONS.contains(&name.as_str()) {
        (depth, depth > max_depth.saturating_add(1))
    } else {
        (depth + 1, depth > max_depth)
    };
    let children = if cut {
        Vec::new()
    } else {
        collect_children(node, child_depth, max_depth)
    };

    Some(HtmlNode {
        node_type: NodeType::Tag,
        name: Some(name),
        attrs,
        content: None,
        children: Some(children),
    })
}
