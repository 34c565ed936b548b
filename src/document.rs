//! Document assembler.
//!
//! Drives the transformer over the top-level HTML nodes and wraps the result
//! in a `document` root, validating root children per
//! [`TopLevelValidation`].

use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::options::TopLevelValidation;
use crate::rich_text::{Document, Node};
use crate::transform::Transformer;

pub(crate) fn assemble(nodes: &[HtmlNode], transformer: &mut Transformer<'_>) -> Result<Document> {
    let converted = transformer.transform_nodes(nodes)?;
    let policy = transformer.options().top_level;

    let mut content = Vec::with_capacity(converted.len());
    for node in converted {
        if let Some(node) = check_top_level(node, policy, transformer)? {
            content.push(node);
        }
    }

    Ok(Document::new(content))
}

fn check_top_level(
    node: Node,
    policy: TopLevelValidation,
    transformer: &mut Transformer<'_>,
) -> Result<Option<Node>> {
    let kind = node.kind();
    if policy == TopLevelValidation::Off || kind.is_top_level_block() {
        return Ok(Some(node));
    }
    match policy {
        TopLevelValidation::Strict => Err(Error::InvalidTopLevel { kind }),
        TopLevelValidation::Drop => {
            transformer.report(Diagnostic::InvalidTopLevel {
                kind,
                dropped: true,
            });
            Ok(None)
        }
        TopLevelValidation::Warn | TopLevelValidation::Off => {
            transformer.report(Diagnostic::InvalidTopLevel {
                kind,
                dropped: false,
            });
            Ok(Some(node))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticSink;
    use crate::options::Options;
    use crate::rich_text::{BlockKind, NodeKind};

    fn assemble_with(
        nodes: &[HtmlNode],
        top_level: TopLevelValidation,
    ) -> (Result<Document>, Vec<Diagnostic>) {
        let options = Options {
            top_level,
            ..Options::default()
        };
        let mut sink = DiagnosticSink::default();
        let result = assemble(nodes, &mut Transformer::new(&options, &mut sink));
        (result, sink.into_diagnostics())
    }

    fn mixed() -> Vec<HtmlNode> {
        vec![
            HtmlNode::element("p").with_children(vec![HtmlNode::text("para")]),
            HtmlNode::text("loose"),
            HtmlNode::element("li"),
        ]
    }

    #[test]
    fn empty_input_gives_empty_document() {
        let (result, diagnostics) = assemble_with(&[], TopLevelValidation::Warn);
        assert_eq!(result.ok(), Some(Document::default()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn warn_keeps_invalid_nodes_and_reports() {
        let (result, diagnostics) = assemble_with(&mixed(), TopLevelValidation::Warn);
        let kinds: Vec<NodeKind> = result
            .map(|d| d.content.iter().map(Node::kind).collect())
            .unwrap_or_default();
        assert_eq!(kinds, vec![NodeKind::Paragraph, NodeKind::Text, NodeKind::ListItem]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::InvalidTopLevel {
                    kind: NodeKind::Text,
                    dropped: false
                },
                Diagnostic::InvalidTopLevel {
                    kind: NodeKind::ListItem,
                    dropped: false
                },
            ]
        );
    }

    #[test]
    fn drop_removes_invalid_nodes() {
        let (result, diagnostics) = assemble_with(&mixed(), TopLevelValidation::Drop);
        assert_eq!(
            result.ok(),
            Some(Document::new(vec![Node::block(
                BlockKind::Paragraph,
                vec![Node::text("para")]
            )]))
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn strict_fails_on_first_invalid_node() {
        let (result, _) = assemble_with(&mixed(), TopLevelValidation::Strict);
        assert!(matches!(
            result,
            Err(Error::InvalidTopLevel {
                kind: NodeKind::Text
            })
        ));
    }

    #[test]
    fn off_skips_validation() {
        let (result, diagnostics) = assemble_with(&mixed(), TopLevelValidation::Off);
        assert_eq!(result.map(|d| d.content.len()).ok(), Some(3));
        assert!(diagnostics.is_empty());
    }
}
