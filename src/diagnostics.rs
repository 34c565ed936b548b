//! Non-fatal conversion diagnostics.
//!
//! Everything the pipeline omits or flags is reported here rather than failing
//! the conversion. Each diagnostic is logged at `warn`, handed to the caller's
//! observer (if any) and collected for [`crate::Conversion`].

use std::fmt;

use crate::html::NodeType;
use crate::options::DiagnosticObserver;
use crate::rich_text::NodeKind;

/// A non-fatal issue encountered during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The pre-filter removed a node (and its subtree).
    RemovedByFilter {
        /// Label of the removed node, e.g. `<script>`.
        node: String,
    },

    /// A hyperlink child that is not text was skipped.
    NonTextHyperlinkChild {
        /// Type of the skipped child.
        child_type: NodeType,
        /// Tag name, for element children.
        name: Option<String>,
    },

    /// A node with no rich text representation was dropped with its subtree.
    DroppedNode {
        /// Label of the dropped node.
        node: String,
    },

    /// An anchor without `href` was dropped.
    MissingHref,

    /// A node that is not a top-level block appeared in the document root.
    InvalidTopLevel {
        /// Kind of the offending node.
        kind: NodeKind,
        /// Whether the node was removed from the document.
        dropped: bool,
    },

    /// A node nested deeper than [`crate::Options::max_depth`] was dropped
    /// with its subtree.
    DepthLimitExceeded {
        /// Label of the dropped node.
        node: String,
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemovedByFilter { node } => {
                write!(f, "pre-filter removed {node} and its descendants")
            }
            Self::NonTextHyperlinkChild { child_type, name } => {
                write!(f, "found child \"{child_type}\"")?;
                if let Some(name) = name {
                    write!(f, " (<{name}>)")?;
                }
                f.write_str(" of hyperlink; only text children are allowed, so it was removed")
            }
            Self::DroppedNode { node } => {
                write!(f, "{node} has no rich text equivalent and was dropped")
            }
            Self::MissingHref => f.write_str("hyperlink without href was dropped"),
            Self::InvalidTopLevel { kind, dropped } => {
                write!(f, "`{kind}` is not a valid top-level block")?;
                if *dropped {
                    f.write_str(" and was dropped")?;
                }
                Ok(())
            }
            Self::DepthLimitExceeded { node, limit } => {
                write!(f, "{node} is nested deeper than {limit} levels and was dropped")
            }
        }
    }
}

/// Collects diagnostics for one conversion call.
#[derive(Default)]
pub(crate) struct DiagnosticSink {
    observer: Option<DiagnosticObserver>,
    collected: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new(observer: Option<DiagnosticObserver>) -> Self {
        Self {
            observer,
            collected: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        if let Some(observer) = &self.observer {
            observer(&diagnostic);
        }
        self.collected.push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.collected
    }
}
