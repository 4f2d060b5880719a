//! Save options and save-time option resolution.
//!
//! A save call's effective options come from one of three places, in
//! priority order: an explicit [`SaveOptions`] passed to the call, the
//! nearest [`Annotation::Save`] on the saved node's ancestor chain
//! (the node itself included), or the defaults. Resolution walks the
//! ownership chain upward only — annotations on descendants of the saved
//! node, or on siblings, never apply.

use crate::tree::{Annotation, AnnotationKind, Document, NodeId};

/// Options controlling serialization output.
///
/// Independent flags; the default has both disabled (formatted output,
/// duplicate namespace declarations kept).
///
/// # Examples
///
/// ```
/// use xylo::serial::SaveOptions;
///
/// let opts = SaveOptions::default()
///     .disable_formatting(true)
///     .omit_duplicate_namespaces(true);
/// assert!(opts.disable_formatting);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOptions {
    /// Suppress all injected line breaks and indentation.
    pub disable_formatting: bool,
    /// Omit a namespace declaration identical to one already declared on a
    /// strict ancestor within the serialized subtree.
    pub omit_duplicate_namespaces: bool,
}

impl SaveOptions {
    /// Enables or disables formatting suppression.
    ///
    /// When set, no line breaks or indentation are inserted anywhere;
    /// text content passes through untouched.
    #[must_use]
    pub fn disable_formatting(mut self, yes: bool) -> Self {
        self.disable_formatting = yes;
        self
    }

    /// Enables or disables duplicate namespace declaration removal.
    ///
    /// When set, a namespace declaration is dropped if a strict ancestor
    /// within the subtree being saved already declares the same prefix
    /// bound to the same URI. A declaration rebinding a prefix to a
    /// different URI is always kept.
    #[must_use]
    pub fn omit_duplicate_namespaces(mut self, yes: bool) -> Self {
        self.omit_duplicate_namespaces = yes;
        self
    }
}

/// Resolves the effective save options for a save starting at `start`.
///
/// If `explicit` is given it applies to the whole save and annotation
/// lookup is skipped. Otherwise the ownership chain is walked from
/// `start` (inclusive) up to the document node; the first
/// [`Annotation::Save`] found wins. With no annotation anywhere on the
/// chain, the defaults apply.
///
/// Resolution is performed fresh on every save call — removing an
/// annotation makes the next save fall through to the nearest remaining
/// ancestor annotation.
///
/// # Examples
///
/// ```
/// use xylo::serial::{effective_options, SaveOptions};
/// use xylo::tree::Annotation;
/// use xylo::Document;
///
/// let mut doc = Document::parse_str("<a><b/></a>").unwrap();
/// let a = doc.root_element().unwrap();
/// let b = doc.child_element(a, "b").unwrap();
///
/// let opts = SaveOptions::default().disable_formatting(true);
/// doc.add_annotation(a, Annotation::Save(opts));
///
/// // Inherited from the parent when starting at b:
/// assert_eq!(effective_options(&doc, b, None), opts);
/// // An explicit value wins over any annotation:
/// let explicit = SaveOptions::default();
/// assert_eq!(effective_options(&doc, b, Some(explicit)), explicit);
/// ```
#[must_use]
pub fn effective_options(
    doc: &Document,
    start: NodeId,
    explicit: Option<SaveOptions>,
) -> SaveOptions {
    if let Some(options) = explicit {
        return options;
    }
    for ancestor in doc.ancestors(start) {
        if let Some(Annotation::Save(options)) = doc.annotation(ancestor, AnnotationKind::Save) {
            return *options;
        }
    }
    SaveOptions::default()
}
