//! Error types for html-to-rich-text.
//!
//! Only precondition breaches, policy failures and hook errors surface here.
//! Schema-constraint violations (non-text hyperlink children, unmapped tags)
//! are recovered by omission and reported as [`crate::Diagnostic`]s instead.

use crate::rich_text::NodeKind;

/// Boxed error returned by caller-owned hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input node is missing a field its `type` requires.
    #[error("malformed HTML node: {0}")]
    MalformedNode(String),

    /// An anchor element has no `href` attribute.
    #[error("hyperlink is missing its href attribute")]
    MissingHref,

    /// A node kind that is not a top-level block ended up in the document root.
    #[error("`{kind}` is not allowed at the top level of a document")]
    InvalidTopLevel {
        /// Kind of the offending node.
        kind: NodeKind,
    },

    /// Rich text JSON did not describe a valid node.
    #[error("invalid rich text: {0}")]
    InvalidRichText(String),

    /// The custom transform hook failed. The hook's error is passed through as is.
    #[error(transparent)]
    CustomTransform(BoxError),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
