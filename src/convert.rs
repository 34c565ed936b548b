//! Conversion pipeline: parse, pre-filter, transform, assemble.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::assemble;
use crate::error::Result;
use crate::filter::rewrite_reporting;
use crate::html::{self, HtmlNode};
use crate::options::Options;
use crate::rich_text::Document;
use crate::transform::Transformer;

/// A converted document together with the diagnostics raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The rich text document.
    pub document: Document,

    /// Non-fatal issues, in the order they were emitted.
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn convert_html(html_str: &str, options: &Options) -> Result<Conversion> {
    tracing::debug!(html_len = html_str.len(), "converting HTML to rich text");
    convert_nodes(html::parse_with_max_depth(html_str, options.max_depth), options)
}

pub(crate) fn convert_nodes(mut nodes: Vec<HtmlNode>, options: &Options) -> Result<Conversion> {
    let mut sink = DiagnosticSink::new(options.on_diagnostic.clone());

    if let Some(filter) = &options.pre_filter {
        rewrite_reporting(
            &mut nodes,
            &mut |node: &HtmlNode| filter(node),
            &mut sink,
            options.max_depth,
        );
        tracing::debug!(top_level_nodes = nodes.len(), "pre-filter applied");
    }

    let assembled = assemble(&nodes, &mut Transformer::new(options, &mut sink));
    html::release(nodes);
    let document = assembled?;
    let diagnostics = sink.into_diagnostics();

    tracing::debug!(
        blocks = document.content.len(),
        diagnostics = diagnostics.len(),
        "rich text document assembled"
    );

    Ok(Conversion {
        document,
        diagnostics,
    })
}
