//! Node transformer.
//!
//! Converts one HTML node into zero or one rich text node by running an
//! ordered chain of strategies. Each strategy either produces a definite
//! result (emit or drop) or passes; the first definite result wins:
//!
//! 1. the caller's custom transform,
//! 2. text leaves,
//! 3. hyperlinks,
//! 4. the tag mapping table.
//!
//! A node no strategy claims is dropped together with its subtree, as is any
//! node nested deeper than [`Options::max_depth`].

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::html::{HtmlNode, NodeType};
use crate::hyperlink::build_hyperlink;
use crate::options::Options;
use crate::rich_text::{Node, Text};
use crate::tags::node_kind_for_tag;

/// Outcome of one strategy.
enum Step {
    Emit(Node),
    Drop,
    Pass,
}

type Strategy = fn(&mut Transformer<'_>, &HtmlNode) -> Result<Step>;

const STRATEGIES: [Strategy; 4] = [
    custom_strategy,
    text_strategy,
    hyperlink_strategy,
    mapped_strategy,
];

/// Stateful driver for one conversion call.
///
/// Custom transforms receive the running transformer so they can fall back
/// to the default rules. Nodes converted through it share the conversion's
/// options, depth budget and diagnostics.
///
/// ```rust
/// use html_to_rich_text::{convert_with_diagnostics, BlockKind, Node, Options};
///
/// // Unwrap <div> into a paragraph instead of dropping it.
/// let options = Options::new().with_custom_transform(|node, transformer| {
///     if !node.is_element("div") {
///         return Ok(None);
///     }
///     let content = transformer.transform_children(node)?;
///     Ok(Some(Node::block(BlockKind::Paragraph, content)))
/// });
///
/// let conversion = convert_with_diagnostics("<div>a<span>b</span></div>", &options)?;
/// assert_eq!(conversion.document.content.len(), 1);
/// assert_eq!(conversion.diagnostics.len(), 1); // the dropped <span>
/// # Ok::<(), html_to_rich_text::Error>(())
/// ```
pub struct Transformer<'a> {
    options: &'a Options,
    sink: &'a mut DiagnosticSink,
    depth: usize,
}

impl<'a> Transformer<'a> {
    pub(crate) fn new(options: &'a Options, sink: &'a mut DiagnosticSink) -> Self {
        Self {
            options,
            sink,
            depth: 0,
        }
    }

    /// Options of the running conversion.
    #[must_use]
    pub fn options(&self) -> &Options {
        self.options
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.sink.emit(diagnostic);
    }

    /// Transform `node` one level below the current one, running the full
    /// strategy chain including the custom transform.
    pub fn transform_node(&mut self, node: &HtmlNode) -> Result<Option<Node>> {
        if self.depth >= self.options.max_depth {
            self.report(Diagnostic::DepthLimitExceeded {
                node: node.describe(),
                limit: self.options.max_depth,
            });
            return Ok(None);
        }

        self.depth += 1;
        let result = self.run(node, &STRATEGIES);
        self.depth -= 1;
        result
    }

    /// Transform the node currently handed to a custom transform with the
    /// default rules only.
    pub fn transform_default(&mut self, node: &HtmlNode) -> Result<Option<Node>> {
        self.run(node, &STRATEGIES[1..])
    }

    /// Transform the children of `node` in order, skipping the ones that
    /// produce nothing.
    pub fn transform_children(&mut self, node: &HtmlNode) -> Result<Vec<Node>> {
        self.transform_nodes(node.children())
    }

    pub(crate) fn transform_nodes(&mut self, nodes: &[HtmlNode]) -> Result<Vec<Node>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(converted) = self.transform_node(node)? {
                out.push(converted);
            }
        }
        Ok(out)
    }

    fn run(&mut self, node: &HtmlNode, strategies: &[Strategy]) -> Result<Option<Node>> {
        for strategy in strategies {
            match strategy(self, node)? {
                Step::Emit(out) => return Ok(Some(out)),
                Step::Drop => return Ok(None),
                Step::Pass => {}
            }
        }

        self.report(Diagnostic::DroppedNode {
            node: node.describe(),
        });
        Ok(None)
    }
}

fn custom_strategy(t: &mut Transformer<'_>, node: &HtmlNode) -> Result<Step> {
    let options = t.options;
    let Some(hook) = &options.custom_transform else {
        return Ok(Step::Pass);
    };
    match hook(node, t).map_err(hook_error)? {
        Some(custom) => {
            tracing::trace!(node = %node.describe(), kind = %custom.kind(), "custom transform");
            Ok(Step::Emit(custom))
        }
        None => Ok(Step::Pass),
    }
}

/// Errors from nested default conversion come back out unwrapped.
fn hook_error(err: crate::error::BoxError) -> Error {
    match err.downcast::<Error>() {
        Ok(inner) => *inner,
        Err(other) => Error::CustomTransform(other),
    }
}

fn text_strategy(t: &mut Transformer<'_>, node: &HtmlNode) -> Result<Step> {
    if !node.is_text() {
        return Ok(Step::Pass);
    }
    let value = node.content.as_deref().unwrap_or_default();
    if t.options.ignore_whitespace_text && value.trim().is_empty() {
        return Ok(Step::Drop);
    }
    Ok(Step::Emit(Node::Text(Text::new(value))))
}

fn hyperlink_strategy(t: &mut Transformer<'_>, node: &HtmlNode) -> Result<Step> {
    if tag_name(node)? != Some("a") {
        return Ok(Step::Pass);
    }
    let link = build_hyperlink(node, t.options.missing_href, t.sink)?;
    Ok(link.map_or(Step::Drop, |link| Step::Emit(Node::Hyperlink(link))))
}

fn mapped_strategy(t: &mut Transformer<'_>, node: &HtmlNode) -> Result<Step> {
    let Some(kind) = tag_name(node)?.and_then(node_kind_for_tag) else {
        return Ok(Step::Pass);
    };
    let content = t.transform_children(node)?;
    Ok(Step::Emit(Node::block(kind, content)))
}

/// Tag name of an element, `None` for other node types.
///
/// An element without a name breaks the input contract and fails the conversion.
fn tag_name(node: &HtmlNode) -> Result<Option<&str>> {
    if node.node_type != NodeType::Tag {
        return Ok(None);
    }
    node.name
        .as_deref()
        .map(Some)
        .ok_or_else(|| Error::MalformedNode(format!("`tag` node without a name: {node:?}")))
}

/// Transform a single HTML subtree on its own, outside any conversion.
///
/// Diagnostics go to the tracing log and the options' observer only. Inside a
/// custom transform use the [`Transformer`] passed to the hook instead, so
/// diagnostics are collected with the rest of the conversion.
pub fn transform_node(node: &HtmlNode, options: &Options) -> Result<Option<Node>> {
    let mut sink = DiagnosticSink::new(options.on_diagnostic.clone());
    Transformer::new(options, &mut sink).transform_node(node)
}
