//! Options: custom transform hook, top-level validation, whitespace handling.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use std::sync::{Arc, Mutex};

use html_to_rich_text::transform::transform_node;
use html_to_rich_text::{
    convert_tree, convert_with_diagnostics, convert_with_options, BlockKind, Diagnostic, Error,
    HtmlNode, Node, NodeKind, NodeType, Options, TopLevelValidation, DEFAULT_MAX_DEPTH,
};

const MIXED_ROOT: &str = r#"<p>para</p><a href="/x">loose link</a>"#;

fn with_top_level(top_level: TopLevelValidation) -> Options {
    Options {
        top_level,
        ..Options::default()
    }
}

#[test]
fn custom_transform_error_aborts_conversion() {
    let options = Options::new().with_custom_transform(|node, _| {
        if node.is_element("custom-widget") {
            Err("boom".into())
        } else {
            Ok(None)
        }
    });

    let err = convert_with_options("<p>ok</p><custom-widget></custom-widget>", &options)
        .expect_err("hook error propagates");

    assert!(matches!(err, Error::CustomTransform(_)));
    assert_eq!(err.to_string(), "boom");
}

fn unwrap_divs() -> Options {
    Options::new().with_custom_transform(|node, transformer| {
        if !node.is_element("div") {
            return Ok(None);
        }
        let content = transformer.transform_children(node)?;
        Ok(Some(Node::block(BlockKind::Paragraph, content)))
    })
}

#[test]
fn custom_transform_can_unwrap_containers() {
    let doc = convert_with_options(r#"<div>text <a href="/y">y</a></div>"#, &unwrap_divs())
        .expect("conversion succeeds");

    let json = serde_json::to_value(&doc).expect("document serializes");
    let paragraph = &json["content"][0];
    assert_eq!(paragraph["nodeType"], "paragraph");
    assert_eq!(paragraph["content"][0]["value"], "text ");
    assert_eq!(paragraph["content"][1]["data"]["uri"], "/y");
}

#[test]
fn unwrapped_children_report_into_the_same_conversion() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_observer = Arc::clone(&seen);
    let options = unwrap_divs().with_diagnostic_observer(move |d| {
        seen_by_observer.lock().expect("lock").push(d.clone());
    });

    let conversion = convert_with_diagnostics(
        r#"<div><a href="/x"><b>b</b></a><span>s</span></div>"#,
        &options,
    )
    .expect("conversion succeeds");

    let expected = vec![
        Diagnostic::NonTextHyperlinkChild {
            child_type: NodeType::Tag,
            name: Some("b".into()),
        },
        Diagnostic::DroppedNode {
            node: "<span>".into(),
        },
    ];
    assert_eq!(conversion.diagnostics, expected);
    assert_eq!(*seen.lock().expect("lock"), expected);
}

#[test]
fn unwrapped_children_follow_the_conversion_policies() {
    let err = convert_with_options("<div><a>no target</a></div>", &unwrap_divs())
        .expect_err("missing href fails");
    assert!(matches!(err, Error::MissingHref));
}

#[test]
fn standalone_transform_node_reports_to_the_observer() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_observer = Arc::clone(&seen);
    let options = Options::new().with_diagnostic_observer(move |d| {
        seen_by_observer.lock().expect("lock").push(d.clone());
    });

    let node = HtmlNode::element("p").with_children(vec![HtmlNode::element("span")]);
    let out = transform_node(&node, &options).expect("transform succeeds");

    assert_eq!(out, Some(Node::block(BlockKind::Paragraph, Vec::new())));
    assert_eq!(
        *seen.lock().expect("lock"),
        vec![Diagnostic::DroppedNode {
            node: "<span>".into()
        }]
    );
}

/// Number of nested first-child blocks below the root.
fn nesting(doc: &html_to_rich_text::Document) -> usize {
    let mut depth = 0;
    let mut level = doc.content.as_slice();
    while let Some(Node::Block(block)) = level.first() {
        depth += 1;
        level = &block.content;
    }
    depth
}

#[test]
fn deeply_nested_html_is_cut_at_max_depth() {
    let html = format!(
        "{}x{}",
        "<blockquote>".repeat(5_000),
        "</blockquote>".repeat(5_000)
    );

    let conversion =
        convert_with_diagnostics(&html, &Options::default()).expect("conversion succeeds");

    assert_eq!(nesting(&conversion.document), DEFAULT_MAX_DEPTH);
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::DepthLimitExceeded {
            node: "<blockquote>".into(),
            limit: DEFAULT_MAX_DEPTH,
        }]
    );
}

#[test]
fn deep_foreign_tree_is_cut_at_max_depth() {
    let mut node = HtmlNode::text("x");
    for _ in 0..1_000 {
        node = HtmlNode::element("blockquote").with_children(vec![node]);
    }
    let options = Options {
        max_depth: 10,
        ..Options::default()
    };

    let conversion = convert_tree(vec![node], &options).expect("conversion succeeds");

    assert_eq!(nesting(&conversion.document), 10);
    assert_eq!(conversion.diagnostics.len(), 1);
}

#[test]
fn max_depth_applies_to_every_branch() {
    let options = Options {
        max_depth: 2,
        ..Options::default()
    };
    let conversion = convert_with_diagnostics(
        "<ul><li>shallow</li><li><p>too deep</p></li></ul>",
        &options,
    )
    .expect("conversion succeeds");

    assert_eq!(
        conversion.document.content,
        vec![Node::block(
            BlockKind::UnorderedList,
            vec![
                Node::block(BlockKind::ListItem, Vec::new()),
                Node::block(BlockKind::ListItem, Vec::new()),
            ]
        )]
    );
    assert_eq!(conversion.diagnostics.len(), 2);
}

#[test]
fn warn_keeps_invalid_root_child_and_reports_it() {
    let conversion = convert_with_diagnostics(MIXED_ROOT, &Options::default())
        .expect("conversion succeeds");

    assert_eq!(conversion.document.content.len(), 2);
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::InvalidTopLevel {
            kind: NodeKind::Hyperlink,
            dropped: false,
        }]
    );
}

#[test]
fn drop_omits_invalid_root_child() {
    let conversion =
        convert_with_diagnostics(MIXED_ROOT, &with_top_level(TopLevelValidation::Drop))
            .expect("conversion succeeds");

    let kinds: Vec<NodeKind> = conversion.document.content.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Paragraph]);
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::InvalidTopLevel {
            kind: NodeKind::Hyperlink,
            dropped: true,
        }]
    );
}

#[test]
fn strict_fails_on_invalid_root_child() {
    let result = convert_with_options(MIXED_ROOT, &with_top_level(TopLevelValidation::Strict));
    assert!(matches!(
        result,
        Err(Error::InvalidTopLevel {
            kind: NodeKind::Hyperlink
        })
    ));
}

#[test]
fn off_skips_validation() {
    let conversion = convert_with_diagnostics(MIXED_ROOT, &with_top_level(TopLevelValidation::Off))
        .expect("conversion succeeds");
    assert_eq!(conversion.document.content.len(), 2);
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn list_items_at_root_are_not_top_level() {
    let result = convert_with_options(
        "<li>orphan</li>",
        &with_top_level(TopLevelValidation::Strict),
    );
    // html5ever keeps a stray <li> in <body>.
    assert!(matches!(
        result,
        Err(Error::InvalidTopLevel {
            kind: NodeKind::ListItem
        })
    ));
}

#[test]
fn whitespace_between_blocks_is_kept_by_default() {
    let html = "<ul>\n  <li>one</li>\n</ul>";
    let doc = convert_with_options(html, &Options::default()).expect("conversion succeeds");
    let json = serde_json::to_value(&doc).expect("document serializes");
    assert_eq!(json["content"][0]["content"].as_array().map(Vec::len), Some(3));
}

#[test]
fn whitespace_between_root_blocks_is_reported_by_default() {
    let conversion = convert_with_diagnostics("<p>A</p>\n<p>B</p>", &Options::default())
        .expect("conversion succeeds");
    assert_eq!(conversion.document.content.len(), 3);
    assert_eq!(
        conversion.diagnostics,
        vec![Diagnostic::InvalidTopLevel {
            kind: NodeKind::Text,
            dropped: false,
        }]
    );

    let options = Options {
        ignore_whitespace_text: true,
        ..Options::default()
    };
    let conversion =
        convert_with_diagnostics("<p>A</p>\n<p>B</p>", &options).expect("conversion succeeds");
    assert_eq!(conversion.document.content.len(), 2);
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn whitespace_between_blocks_can_be_skipped() {
    let options = Options {
        ignore_whitespace_text: true,
        ..Options::default()
    };
    let doc = convert_with_options("<ul>\n  <li>one</li>\n</ul>", &options)
        .expect("conversion succeeds");

    assert_eq!(
        doc.content,
        vec![Node::block(
            BlockKind::UnorderedList,
            vec![Node::block(BlockKind::ListItem, vec![Node::text("one")])]
        )]
    );
}

#[test]
fn options_are_reusable_across_threads() {
    let options = Options::new().with_custom_transform(|_, _| Ok(None));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let options = options.clone();
            std::thread::spawn(move || {
                convert_with_options(&format!("<p>{i}</p>"), &options).map(|doc| doc.content.len())
            })
        })
        .collect();

    for handle in handles {
        let len = handle.join().expect("thread completes").expect("conversion succeeds");
        assert_eq!(len, 1);
    }
}
