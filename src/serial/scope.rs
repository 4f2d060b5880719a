//! Namespace scope tracking.
//!
//! Computes the in-scope namespace bindings at a node by walking its
//! ancestor chain, and answers the redundancy question the serializer asks
//! under `omit_duplicate_namespaces`: is the declaration about to be
//! emitted on an element identical to one already visible from a strict
//! ancestor? These checks are purely structural — whether anything is done
//! about a redundant declaration is the save policy's decision, not this
//! module's.
//!
//! See <https://www.w3.org/TR/xml-names/> for the scoping rules.

use crate::tree::{Document, NodeId, NodeKind};

/// Returns the namespace bindings in scope at `node`.
///
/// Each entry is `(bound prefix, URI)`, with `None` as the prefix for the
/// default namespace. Walks from `node` to the document root; the nearest
/// declaration of a prefix shadows farther ones, so each prefix appears at
/// most once, in nearest-first discovery order.
///
/// # Examples
///
/// ```
/// use xylo::serial::in_scope_bindings;
/// use xylo::Document;
///
/// let doc = Document::parse_str(
///     "<root xmlns:a='urn:one'><leaf xmlns:b='urn:two'/></root>",
/// ).unwrap();
/// let root = doc.root_element().unwrap();
/// let leaf = doc.child_element(root, "leaf").unwrap();
///
/// let bindings = in_scope_bindings(&doc, leaf);
/// assert!(bindings.contains(&(Some("b"), "urn:two")));
/// assert!(bindings.contains(&(Some("a"), "urn:one")));
/// ```
#[must_use]
pub fn in_scope_bindings(doc: &Document, node: NodeId) -> Vec<(Option<&str>, &str)> {
    let mut bindings: Vec<(Option<&str>, &str)> = Vec::new();
    for ancestor in doc.ancestors(node) {
        for attr in doc.attributes(ancestor) {
            if let Some((prefix, uri)) = attr.namespace_binding() {
                if !bindings.iter().any(|(p, _)| *p == prefix) {
                    bindings.push((prefix, uri));
                }
            }
        }
    }
    bindings
}

/// Resolves the namespace URI in scope for `prefix` at `node`.
///
/// `prefix = None` resolves the default namespace.
#[must_use]
pub fn lookup_namespace<'d>(
    doc: &'d Document,
    node: NodeId,
    prefix: Option<&str>,
) -> Option<&'d str> {
    for ancestor in doc.ancestors(node) {
        for attr in doc.attributes(ancestor) {
            if let Some((p, uri)) = attr.namespace_binding() {
                if p == prefix {
                    return Some(uri);
                }
            }
        }
    }
    None
}

/// Resolves the namespace URI of an element from its own prefix.
///
/// Returns `None` for non-element nodes, for unbound prefixes, and for
/// unprefixed elements with no default namespace in scope.
#[must_use]
pub fn namespace_uri<'d>(doc: &'d Document, node: NodeId) -> Option<&'d str> {
    match &doc.node(node).kind {
        NodeKind::Element { prefix, .. } => lookup_namespace(doc, node, prefix.as_deref()),
        _ => None,
    }
}

/// Returns `true` iff a strict ancestor of `node`, no farther than `stop`,
/// declares `prefix` bound to exactly `uri` as its nearest declaration.
///
/// This is the redundancy test for a declaration about to be emitted on
/// `node`: the walk starts at the parent, and the first ancestor declaring
/// `prefix` decides — same URI means the declaration on `node` duplicates
/// what is already visible, a different URI means `node` legitimately
/// rebinds the prefix. `stop` bounds the walk to the subtree being
/// serialized: ancestors above the save root were not written in this save,
/// so nothing can be redundant relative to them.
#[must_use]
pub fn declared_identically_above(
    doc: &Document,
    node: NodeId,
    stop: NodeId,
    prefix: Option<&str>,
    uri: &str,
) -> bool {
    if node == stop {
        return false;
    }
    let mut current = doc.parent(node);
    while let Some(ancestor) = current {
        for attr in doc.attributes(ancestor) {
            if let Some((p, u)) = attr.namespace_binding() {
                if p == prefix {
                    return u == uri;
                }
            }
        }
        if ancestor == stop {
            break;
        }
        current = doc.parent(ancestor);
    }
    false
}
