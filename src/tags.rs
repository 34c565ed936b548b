//! Tag mapping table.
//!
//! Static lookup from HTML tag name to the rich text block kind it becomes.
//! Anchors are not listed here; they go through the hyperlink builder.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::rich_text::BlockKind;

/// Tag/kind pairs, in document order of the schema.
pub static TAG_BLOCK_KINDS: [(&str, BlockKind); 16] = [
    ("p", BlockKind::Paragraph),
    ("h1", BlockKind::Heading1),
    ("h2", BlockKind::Heading2),
    ("h3", BlockKind::Heading3),
    ("h4", BlockKind::Heading4),
    ("h5", BlockKind::Heading5),
    ("h6", BlockKind::Heading6),
    ("ul", BlockKind::UnorderedList),
    ("ol", BlockKind::OrderedList),
    ("li", BlockKind::ListItem),
    ("hr", BlockKind::HorizontalRule),
    ("blockquote", BlockKind::Quote),
    ("table", BlockKind::Table),
    ("tr", BlockKind::TableRow),
    ("td", BlockKind::TableCell),
    ("th", BlockKind::TableHeaderCell),
];

/// `TAG_BLOCK_KINDS` as a `HashMap`
pub static TAG_BLOCK_KIND_MAP: LazyLock<HashMap<&'static str, BlockKind>> =
    LazyLock::new(|| TAG_BLOCK_KINDS.into_iter().collect());

/// Rich text kind for an HTML tag, or `None` when the tag has no direct mapping.
#[inline]
#[must_use]
pub fn node_kind_for_tag(name: &str) -> Option<BlockKind> {
    TAG_BLOCK_KIND_MAP.get(name).copied()
}
