//! Configuration options for conversion.
//!
//! The `Options` struct carries the caller's hooks (custom transform,
//! pre-filter, diagnostic observer) and the validation policies applied by
//! the transformer and document assembler.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::Diagnostic;
use crate::error::BoxError;
use crate::filter::FilterAction;
use crate::html::HtmlNode;
use crate::rich_text::Node;
use crate::transform::Transformer;

/// Default nesting limit for [`Options::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Per-node override hook. `Ok(Some(node))` replaces the default output for
/// that node; `Ok(None)` defers to the default rules; `Err` aborts the
/// conversion with the error passed through unchanged.
///
/// The hook receives the running [`Transformer`], so falling back to the
/// default rules for children keeps their diagnostics in the same conversion.
pub type CustomTransform = Arc<
    dyn Fn(&HtmlNode, &mut Transformer<'_>) -> Result<Option<Node>, BoxError> + Send + Sync,
>;

/// Tree-rewrite predicate applied to every node before transformation.
pub type PreFilter = Arc<dyn Fn(&HtmlNode) -> FilterAction + Send + Sync>;

/// Side channel receiving each diagnostic as it is emitted.
pub type DiagnosticObserver = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// How the document assembler treats root children that are not top-level blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopLevelValidation {
    /// No check.
    Off,
    /// Keep the node and emit a diagnostic.
    ///
    /// Whitespace between blocks (`"<p>A</p>\n<p>B</p>"`) parses to bare text
    /// nodes at the root, each of which is kept and reported. Set
    /// [`Options::ignore_whitespace_text`] to drop them before validation.
    #[default]
    Warn,
    /// Omit the node and emit a diagnostic.
    Drop,
    /// Fail the conversion with [`crate::Error::InvalidTopLevel`].
    Strict,
}

/// What to do with an anchor that has no `href`.
///
/// Named anchors such as `<a name="top"></a>` have no `href` either, so with
/// the default policy a single in-page target fails the whole conversion.
/// Use [`MissingHrefPolicy::Drop`] for HTML that contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingHrefPolicy {
    /// Fail the conversion with [`crate::Error::MissingHref`].
    #[default]
    Error,
    /// Omit the anchor and emit a diagnostic.
    Drop,
}

/// Configuration options for conversion.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, or the `with_*` helpers to attach closures.
///
/// # Example
///
/// ```rust
/// use html_to_rich_text::{FilterAction, Options, TopLevelValidation};
///
/// let options = Options {
///     top_level: TopLevelValidation::Drop,
///     ..Options::default()
/// }
/// .with_pre_filter(|node| FilterAction::from(!node.is_element("script")));
/// ```
#[derive(Clone)]
pub struct Options {
    /// Override hook consulted before the default rules for every node.
    ///
    /// Default: `None`
    pub custom_transform: Option<CustomTransform>,

    /// Rewrite predicate applied to the whole tree before transformation.
    ///
    /// Default: `None`
    pub pre_filter: Option<PreFilter>,

    /// Observer notified of every diagnostic.
    ///
    /// Default: `None`
    pub on_diagnostic: Option<DiagnosticObserver>,

    /// Validation of the document root's children.
    ///
    /// Default: `TopLevelValidation::Warn`
    pub top_level: TopLevelValidation,

    /// Handling of anchors without `href`.
    ///
    /// Default: `MissingHrefPolicy::Error`
    pub missing_href: MissingHrefPolicy,

    /// Drop text nodes that contain only whitespace.
    ///
    /// Default: `false`
    pub ignore_whitespace_text: bool,

    /// Maximum nesting depth converted.
    ///
    /// Top-level nodes are at depth 1. A node nested deeper is dropped with
    /// its subtree and reported as [`Diagnostic::DepthLimitExceeded`]. Bounds
    /// the recursion of the parser adapter, the pre-filter and the transformer.
    ///
    /// Default: `100`
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            custom_transform: None,
            pre_filter: None,
            on_diagnostic: None,
            top_level: TopLevelValidation::default(),
            missing_href: MissingHrefPolicy::default(),
            ignore_whitespace_text: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_custom_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&HtmlNode, &mut Transformer<'_>) -> Result<Option<Node>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.custom_transform = Some(Arc::new(transform));
        self
    }

    #[must_use]
    pub fn with_pre_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&HtmlNode) -> FilterAction + Send + Sync + 'static,
    {
        self.pre_filter = Some(Arc::new(filter));
        self
    }

    #[must_use]
    pub fn with_diagnostic_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        self.on_diagnostic = Some(Arc::new(observer));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_transform", &self.custom_transform.is_some())
            .field("pre_filter", &self.pre_filter.is_some())
            .field("on_diagnostic", &self.on_diagnostic.is_some())
            .field("top_level", &self.top_level)
            .field("missing_href", &self.missing_href)
            .field("ignore_whitespace_text", &self.ignore_whitespace_text)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
