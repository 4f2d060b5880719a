//! Tree serialization.
//!
//! Serializes a node and its subtree into XML text. The effective
//! [`SaveOptions`] for a call come either from an explicit argument or
//! from annotation resolution starting at the saved node (see
//! [`super::effective_options`]); the resolved options then govern the
//! whole subtree. Namespace-declaration deduplication is the exception:
//! it is inherently per-element, checked against each element's strict
//! ancestors within the saved subtree as the writer descends.
//!
//! Fragment output carries no XML declaration; writing the declaration is
//! the file target's concern (see [`super::save_to_file`]).

use super::emitter::Emitter;
use super::{effective_options, scope, SaveOptions};
use crate::tree::{Document, NodeId, NodeKind};

/// Serializes a node and its subtree, resolving save options from
/// annotations on the node's ancestor chain.
///
/// Document nodes serialize their prolog comments/PIs and root element
/// with no enclosing wrapper.
///
/// # Examples
///
/// ```
/// use xylo::serial::serialize;
/// use xylo::Document;
///
/// let doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(
///     serialize(&doc, root),
///     "<root>\r\n  <child>Hello</child>\r\n</root>"
/// );
/// ```
#[must_use]
pub fn serialize(doc: &Document, node: NodeId) -> String {
    serialize_resolved(doc, node, effective_options(doc, node, None))
}

/// Serializes a node and its subtree with explicit options, skipping
/// annotation resolution entirely.
///
/// # Examples
///
/// ```
/// use xylo::serial::{serialize_with_options, SaveOptions};
/// use xylo::Document;
///
/// let doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
/// let root = doc.root_element().unwrap();
/// let opts = SaveOptions::default().disable_formatting(true);
/// assert_eq!(
///     serialize_with_options(&doc, root, opts),
///     "<root><child>Hello</child></root>"
/// );
/// ```
#[must_use]
pub fn serialize_with_options(doc: &Document, node: NodeId, options: SaveOptions) -> String {
    serialize_resolved(doc, node, options)
}

/// Serializes the whole document (prolog and root element).
#[must_use]
pub fn serialize_document(doc: &Document) -> String {
    serialize(doc, doc.root())
}

/// Serializes the whole document with explicit options.
#[must_use]
pub fn serialize_document_with_options(doc: &Document, options: SaveOptions) -> String {
    serialize_with_options(doc, doc.root(), options)
}

fn serialize_resolved(doc: &Document, node: NodeId, options: SaveOptions) -> String {
    let mut emitter = Emitter::new(options);
    write_node(
        doc,
        node,
        node,
        options.omit_duplicate_namespaces,
        &mut emitter,
    );
    emitter.finish()
}

/// Writes one node and its subtree.
///
/// `save_root` bounds the namespace-redundancy walk: declarations on
/// ancestors outside the saved subtree were not written in this call, so
/// nothing is redundant relative to them.
pub(crate) fn write_node(
    doc: &Document,
    id: NodeId,
    save_root: NodeId,
    omit_duplicates: bool,
    emitter: &mut Emitter,
) {
    match &doc.node(id).kind {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(doc, child, save_root, omit_duplicates, emitter);
            }
        }
        NodeKind::Element {
            name,
            prefix,
            attributes,
        } => {
            emitter.start_element(prefix.as_deref(), name);
            for attr in attributes {
                if omit_duplicates {
                    if let Some((p, uri)) = attr.namespace_binding() {
                        if scope::declared_identically_above(doc, id, save_root, p, uri) {
                            continue;
                        }
                    }
                }
                emitter.attribute(attr.prefix.as_deref(), &attr.name, &attr.value);
            }
            for child in doc.children(id) {
                write_node(doc, child, save_root, omit_duplicates, emitter);
            }
            emitter.end_element();
        }
        NodeKind::Text { content } => emitter.text(content),
        NodeKind::CData { content } => emitter.cdata(content),
        NodeKind::Comment { content } => emitter.comment(content),
        NodeKind::ProcessingInstruction { target, data } => {
            emitter.pi(target, data.as_deref());
        }
    }
}
