//! # html-to-rich-text
//!
//! Converts HTML into Contentful-style rich text documents.
//!
//! The HTML is parsed into an owned tree of [`HtmlNode`]s, optionally
//! rewritten by a caller pre-filter, then transformed node by node into the
//! rich text schema: mapped block tags, text-only hyperlinks and text leaves.
//! A custom transform hook can override the default output for any node.
//!
//! ## Quick Start
//!
//! ```rust
//! use html_to_rich_text::{convert, NodeKind};
//!
//! let doc = convert(r#"<h1>Title</h1><p>Body text.</p>"#)?;
//! assert_eq!(doc.content[0].kind(), NodeKind::Heading1);
//!
//! let json = serde_json::to_value(&doc).unwrap_or_default();
//! assert_eq!(json["nodeType"], "document");
//! # Ok::<(), html_to_rich_text::Error>(())
//! ```
//!
//! ## Overriding nodes
//!
//! ```rust
//! use html_to_rich_text::{convert_with_options, BlockKind, Node, Options};
//!
//! let options = Options::new().with_custom_transform(|node, _| {
//!     Ok(node
//!         .is_element("custom-widget")
//!         .then(|| Node::block(BlockKind::Paragraph, vec![Node::text("widget")])))
//! });
//! let doc = convert_with_options("<custom-widget>text</custom-widget>", &options)?;
//! assert_eq!(doc.content.len(), 1);
//! # Ok::<(), html_to_rich_text::Error>(())
//! ```
//!
//! The hook also receives the running [`Transformer`]; calling
//! [`Transformer::transform_children`] unwraps a container with the default
//! rules instead of dropping it.
//!
//! Unmapped tags, non-text hyperlink children and pre-filter removals are not
//! errors: they are reported as [`Diagnostic`]s through `tracing`, the
//! optional observer in [`Options`], and [`Conversion::diagnostics`].

mod convert;
mod diagnostics;
mod document;
mod error;
mod hyperlink;
mod options;

/// HTML tree model and the `dom_query` parser adapter.
pub mod html;

/// Rich text node model and its JSON form.
pub mod rich_text;

/// Tag mapping table.
pub mod tags;

/// Pre-transform tree rewriting and ready-made predicates.
pub mod filter;

/// Single-node transformation with the default rules.
pub mod transform;

/// Character encoding detection and transcoding.
pub mod encoding;

pub use convert::Conversion;
pub use diagnostics::Diagnostic;
pub use error::{BoxError, Error, Result};
pub use filter::FilterAction;
pub use html::{HtmlNode, NodeType};
pub use options::{
    CustomTransform, DiagnosticObserver, MissingHrefPolicy, Options, PreFilter,
    TopLevelValidation, DEFAULT_MAX_DEPTH,
};
pub use rich_text::{Block, BlockKind, Document, Hyperlink, Mark, MarkKind, Node, NodeKind, Text};
pub use transform::Transformer;

/// Converts an HTML string using default options.
///
/// # Example
///
/// ```rust
/// use html_to_rich_text::convert;
///
/// let doc = convert(r#"<a href="/page_1">click</a>"#)?;
/// let json = serde_json::to_value(&doc).unwrap_or_default();
/// assert_eq!(json["content"][0]["data"]["uri"], "/page_1");
/// # Ok::<(), html_to_rich_text::Error>(())
/// ```
pub fn convert(html: &str) -> Result<Document> {
    convert_with_options(html, &Options::default())
}

/// Converts an HTML string with custom options.
pub fn convert_with_options(html: &str, options: &Options) -> Result<Document> {
    convert::convert_html(html, options).map(|c| c.document)
}

/// Converts an HTML string and returns the diagnostics alongside the document.
///
/// # Example
///
/// ```rust
/// use html_to_rich_text::{convert_with_diagnostics, Options};
///
/// let html = r#"<p><a href="/x"><b>bold</b></a></p>"#;
/// let conversion = convert_with_diagnostics(html, &Options::default())?;
/// assert_eq!(conversion.diagnostics.len(), 1);
/// # Ok::<(), html_to_rich_text::Error>(())
/// ```
pub fn convert_with_diagnostics(html: &str, options: &Options) -> Result<Conversion> {
    convert::convert_html(html, options)
}

/// Converts an already parsed HTML tree.
///
/// Use this when the HTML comes from another parser; the pre-filter still
/// runs first.
pub fn convert_tree(nodes: Vec<HtmlNode>, options: &Options) -> Result<Conversion> {
    convert::convert_nodes(nodes, options)
}

/// Converts HTML bytes with automatic encoding detection and default options.
///
/// The charset is taken from `<meta charset>` or the `Content-Type` meta tag
/// and defaults to UTF-8. Invalid sequences become U+FFFD.
///
/// ```rust
/// use html_to_rich_text::convert_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
/// let doc = convert_bytes(html)?;
/// let json = serde_json::to_value(&doc).unwrap_or_default();
/// assert_eq!(json["content"][0]["content"][0]["value"], "Café");
/// # Ok::<(), html_to_rich_text::Error>(())
/// ```
pub fn convert_bytes(html: &[u8]) -> Result<Document> {
    convert_bytes_with_options(html, &Options::default())
}

/// Converts HTML bytes with custom options and automatic encoding detection.
pub fn convert_bytes_with_options(html: &[u8], options: &Options) -> Result<Document> {
    let html_str = encoding::transcode_to_utf8(html);
    convert_with_options(&html_str, options)
}
