//! Rich text document model.
//!
//! Mirrors the Contentful rich text schema: every node carries a `nodeType`
//! discriminant and a `data` map. Containers carry ordered `content`, while the
//! text leaf carries `value` and `marks`. Serialization produces that JSON shape
//! exactly; deserialization validates it.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Kind-specific data attached to a node.
pub type Data = Map<String, Value>;

/// Node-kind discriminants defined by the rich text schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    Heading3,
    #[serde(rename = "heading-4")]
    Heading4,
    #[serde(rename = "heading-5")]
    Heading5,
    #[serde(rename = "heading-6")]
    Heading6,
    #[serde(rename = "ordered-list")]
    OrderedList,
    #[serde(rename = "unordered-list")]
    UnorderedList,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "hr")]
    HorizontalRule,
    #[serde(rename = "blockquote")]
    Quote,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "table-row")]
    TableRow,
    #[serde(rename = "table-cell")]
    TableCell,
    #[serde(rename = "table-header-cell")]
    TableHeaderCell,
    #[serde(rename = "hyperlink")]
    Hyperlink,
    #[serde(rename = "text")]
    Text,
}

impl NodeKind {
    /// The schema's string constant for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading-1",
            Self::Heading2 => "heading-2",
            Self::Heading3 => "heading-3",
            Self::Heading4 => "heading-4",
            Self::Heading5 => "heading-5",
            Self::Heading6 => "heading-6",
            Self::OrderedList => "ordered-list",
            Self::UnorderedList => "unordered-list",
            Self::ListItem => "list-item",
            Self::HorizontalRule => "hr",
            Self::Quote => "blockquote",
            Self::Table => "table",
            Self::TableRow => "table-row",
            Self::TableCell => "table-cell",
            Self::TableHeaderCell => "table-header-cell",
            Self::Hyperlink => "hyperlink",
            Self::Text => "text",
        }
    }

    /// Whether the schema allows this kind directly under the document root.
    #[must_use]
    pub const fn is_top_level_block(self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::Heading4
                | Self::Heading5
                | Self::Heading6
                | Self::OrderedList
                | Self::UnorderedList
                | Self::HorizontalRule
                | Self::Quote
                | Self::Table
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block container kinds (everything except document, hyperlink and text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    OrderedList,
    UnorderedList,
    ListItem,
    HorizontalRule,
    Quote,
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
}

impl BlockKind {
    /// Heading kind for levels 1 through 6.
    #[must_use]
    pub const fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }
}

impl From<BlockKind> for NodeKind {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => Self::Paragraph,
            BlockKind::Heading1 => Self::Heading1,
            BlockKind::Heading2 => Self::Heading2,
            BlockKind::Heading3 => Self::Heading3,
            BlockKind::Heading4 => Self::Heading4,
            BlockKind::Heading5 => Self::Heading5,
            BlockKind::Heading6 => Self::Heading6,
            BlockKind::OrderedList => Self::OrderedList,
            BlockKind::UnorderedList => Self::UnorderedList,
            BlockKind::ListItem => Self::ListItem,
            BlockKind::HorizontalRule => Self::HorizontalRule,
            BlockKind::Quote => Self::Quote,
            BlockKind::Table => Self::Table,
            BlockKind::TableRow => Self::TableRow,
            BlockKind::TableCell => Self::TableCell,
            BlockKind::TableHeaderCell => Self::TableHeaderCell,
        }
    }
}

impl TryFrom<NodeKind> for BlockKind {
    type Error = NodeKind;

    fn try_from(kind: NodeKind) -> std::result::Result<Self, NodeKind> {
        Ok(match kind {
            NodeKind::Paragraph => Self::Paragraph,
            NodeKind::Heading1 => Self::Heading1,
            NodeKind::Heading2 => Self::Heading2,
            NodeKind::Heading3 => Self::Heading3,
            NodeKind::Heading4 => Self::Heading4,
            NodeKind::Heading5 => Self::Heading5,
            NodeKind::Heading6 => Self::Heading6,
            NodeKind::OrderedList => Self::OrderedList,
            NodeKind::UnorderedList => Self::UnorderedList,
            NodeKind::ListItem => Self::ListItem,
            NodeKind::HorizontalRule => Self::HorizontalRule,
            NodeKind::Quote => Self::Quote,
            NodeKind::Table => Self::Table,
            NodeKind::TableRow => Self::TableRow,
            NodeKind::TableCell => Self::TableCell,
            NodeKind::TableHeaderCell => Self::TableHeaderCell,
            other @ (NodeKind::Document | NodeKind::Hyperlink | NodeKind::Text) => {
                return Err(other)
            }
        })
    }
}

/// Style marker on a text leaf. The converter itself never emits marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
}

/// Mark types defined by the rich text schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    Strikethrough,
}

/// Any node that may appear inside a document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Node {
    Block(Block),
    Hyperlink(Hyperlink),
    Text(Text),
}

impl Node {
    /// Discriminant of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Block(block) => block.kind.into(),
            Self::Hyperlink(_) => NodeKind::Hyperlink,
            Self::Text(_) => NodeKind::Text,
        }
    }

    /// Plain text leaf with no marks.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Text::new(value))
    }

    /// Block node with empty data.
    #[must_use]
    pub fn block(kind: BlockKind, content: Vec<Node>) -> Self {
        Self::Block(Block::new(kind, content))
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

impl From<Hyperlink> for Node {
    fn from(link: Hyperlink) -> Self {
        Self::Hyperlink(link)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

/// Container node (paragraph, heading, list, table parts, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub data: Data,
    pub content: Vec<Node>,
}

impl Block {
    #[must_use]
    pub fn new(kind: BlockKind, content: Vec<Node>) -> Self {
        Self {
            kind,
            data: Data::new(),
            content,
        }
    }
}

/// Inline hyperlink. Its content is text-only by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    pub uri: String,
    pub content: Vec<Text>,
}

/// Text leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub value: String,
    pub marks: Vec<Mark>,
    pub data: Data,
}

impl Text {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Root of a rich text document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Document {
    pub data: Data,
    pub content: Vec<Node>,
}

impl Document {
    #[must_use]
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            data: Data::new(),
            content,
        }
    }
}

// === Serialization ===

#[derive(Serialize)]
struct HyperlinkData<'a> {
    uri: &'a str,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Block(block) => block.serialize(serializer),
            Self::Hyperlink(link) => link.serialize(serializer),
            Self::Text(text) => text.serialize(serializer),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("nodeType", &NodeKind::from(self.kind))?;
        map.serialize_entry("data", &self.data)?;
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}

impl Serialize for Hyperlink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("nodeType", &NodeKind::Hyperlink)?;
        map.serialize_entry("data", &HyperlinkData { uri: &self.uri })?;
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("nodeType", &NodeKind::Text)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("marks", &self.marks)?;
        map.serialize_entry("data", &self.data)?;
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("nodeType", &NodeKind::Document)?;
        map.serialize_entry("data", &self.data)?;
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}

// === Deserialization ===

/// Loosely typed wire form, validated into [`Node`] / [`Document`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    node_type: NodeKind,
    #[serde(default)]
    data: Data,
    #[serde(default)]
    content: Vec<RawNode>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    marks: Vec<Mark>,
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        match raw.node_type {
            NodeKind::Text => {
                let value = raw
                    .value
                    .ok_or_else(|| Error::InvalidRichText("text node is missing `value`".into()))?;
                Ok(Self::Text(Text {
                    value,
                    marks: raw.marks,
                    data: raw.data,
                }))
            }
            NodeKind::Hyperlink => {
                let uri = raw
                    .data
                    .get("uri")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::InvalidRichText("hyperlink data is missing `uri`".into()))?
                    .to_owned();
                let content = raw
                    .content
                    .into_iter()
                    .map(|child| match Self::try_from(child)? {
                        Self::Text(text) => Ok(text),
                        other => Err(Error::InvalidRichText(format!(
                            "hyperlink content must be text, found `{}`",
                            other.kind()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Hyperlink(Hyperlink { uri, content }))
            }
            kind => {
                let kind = BlockKind::try_from(kind).map_err(|kind| {
                    Error::InvalidRichText(format!("`{kind}` cannot appear inside another node"))
                })?;
                let content = raw
                    .content
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Block(Block {
                    kind,
                    data: raw.data,
                    content,
                }))
            }
        }
    }
}

impl TryFrom<RawNode> for Document {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        if raw.node_type != NodeKind::Document {
            return Err(Error::InvalidRichText(format!(
                "expected a `document` root, found `{}`",
                raw.node_type
            )));
        }
        let content = raw
            .content
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            data: raw.data,
            content,
        })
    }
}
