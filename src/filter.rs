//! Tree filter/rewriter.
//!
//! Applies a caller predicate to every node in pre-order before
//! transformation. Each sibling level is taken out of its parent and rebuilt
//! by position, so removals and replacements never skip or repeat a sibling.
//! Levels below the depth limit are left alone; the transformer drops them.

use regex::Regex;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::html::HtmlNode;
use crate::options::DEFAULT_MAX_DEPTH;

/// Verdict of a pre-filter for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Leave the node in place and descend into its children.
    Keep,
    /// Excise the node and its whole subtree.
    Remove,
    /// Put this node in the original's position. The replacement is not
    /// filtered again.
    Replace(HtmlNode),
}

impl From<bool> for FilterAction {
    fn from(keep: bool) -> Self {
        if keep {
            Self::Keep
        } else {
            Self::Remove
        }
    }
}

impl From<HtmlNode> for FilterAction {
    fn from(node: HtmlNode) -> Self {
        Self::Replace(node)
    }
}

/// Rewrite `nodes` in place with `predicate` and return them for chaining.
///
/// Nodes nested deeper than [`DEFAULT_MAX_DEPTH`] are not visited.
pub fn rewrite<F>(nodes: &mut Vec<HtmlNode>, mut predicate: F) -> &mut Vec<HtmlNode>
where
    F: FnMut(&HtmlNode) -> FilterAction,
{
    let mut sink = DiagnosticSink::default();
    rewrite_reporting(nodes, &mut predicate, &mut sink, DEFAULT_MAX_DEPTH);
    nodes
}

/// Same as [`rewrite`] with an explicit depth limit, reporting removals to `sink`.
pub(crate) fn rewrite_reporting<F>(
    nodes: &mut Vec<HtmlNode>,
    predicate: &mut F,
    sink: &mut DiagnosticSink,
    max_depth: usize,
) where
    F: FnMut(&HtmlNode) -> FilterAction + ?Sized,
{
    rewrite_level(nodes, predicate, sink, 1, max_depth);
}

fn rewrite_level<F>(
    nodes: &mut Vec<HtmlNode>,
    predicate: &mut F,
    sink: &mut DiagnosticSink,
    depth: usize,
    max_depth: usize,
) where
    F: FnMut(&HtmlNode) -> FilterAction + ?Sized,
{
    if depth > max_depth {
        return;
    }

    let snapshot = std::mem::take(nodes);
    nodes.reserve(snapshot.len());

    for mut node in snapshot {
        match predicate(&node) {
            FilterAction::Remove => {
                sink.emit(Diagnostic::RemovedByFilter {
                    node: node.describe(),
                });
            }
            FilterAction::Replace(replacement) => nodes.push(replacement),
            FilterAction::Keep => {
                if let Some(children) = node.children.as_mut() {
                    rewrite_level(children, predicate, sink, depth + 1, max_depth);
                }
                nodes.push(node);
            }
        }
    }
}

// === Ready-made predicates ===

/// Remove anchors whose `href` matches `pattern`.
///
/// ```rust
/// use html_to_rich_text::{convert_with_options, filter, Options};
/// use regex::Regex;
///
/// let archived = Regex::new(r"\{page_\d+\}")?;
/// let options = Options::new().with_pre_filter(filter::reject_links_matching(archived));
/// let doc = convert_with_options(r#"<a href="{page_3}">x</a>"#, &options)?;
/// assert!(doc.content.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reject_links_matching(pattern: Regex) -> impl Fn(&HtmlNode) -> FilterAction + Send + Sync {
    move |node| {
        let archived = node.is_element("a")
            && node.attr("href").is_some_and(|href| pattern.is_match(href));
        FilterAction::from(!archived)
    }
}

/// Remove every element whose tag name is in `tags`.
pub fn remove_tags(tags: &[&str]) -> impl Fn(&HtmlNode) -> FilterAction + Send + Sync {
    let tags: Vec<String> = tags.iter().map(|t| (*t).to_string()).collect();
    move |node| {
        let matched = tags.iter().any(|tag| node.is_element(tag));
        FilterAction::from(!matched)
    }
}
