//! Hyperlink builder.
//!
//! The schema only allows text inside a hyperlink, so only the anchor's direct
//! text children are kept. Anything else is reported and skipped; it is never
//! transformed, retried or promoted.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::options::MissingHrefPolicy;
use crate::rich_text::{Hyperlink, Text};

/// Build a hyperlink from an `<a>` element.
///
/// Returns `Ok(None)` only when the anchor has no `href` and the policy is
/// [`MissingHrefPolicy::Drop`].
pub(crate) fn build_hyperlink(
    node: &HtmlNode,
    missing_href: MissingHrefPolicy,
    sink: &mut DiagnosticSink,
) -> Result<Option<Hyperlink>> {
    let Some(uri) = node.attr("href") else {
        return match missing_href {
            MissingHrefPolicy::Error => Err(Error::MissingHref),
            MissingHrefPolicy::Drop => {
                sink.emit(Diagnostic::MissingHref);
                Ok(None)
            }
        };
    };

    let mut content = Vec::with_capacity(node.children().len());
    for child in node.children() {
        if child.is_text() {
            content.push(Text::new(child.content.as_deref().unwrap_or_default()));
        } else {
            sink.emit(Diagnostic::NonTextHyperlinkChild {
                child_type: child.node_type,
                name: child.name.clone(),
            });
        }
    }

    Ok(Some(Hyperlink {
        uri: uri.to_owned(),
        content,
    }))
}
