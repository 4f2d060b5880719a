//! Arena-based XML document tree.
//!
//! This module implements the core tree representation using arena allocation
//! with typed indices. All nodes live in a contiguous `Vec<NodeData>` owned by
//! the `Document`, and are referenced by `NodeId` — a newtype over `NonZeroU32`.
//!
//! Navigation links (parent, first\_child, last\_child, next\_sibling,
//! prev\_sibling) are arena indices rather than pointers, so ownership stays
//! with the `Document` and the parent link is a plain back-reference: walking
//! the ownership chain from any node to the document root is an explicit loop
//! over `parent`, which is exactly how save-time option resolution works
//! (see [`crate::serial::effective_options`]).
//!
//! Besides its XML content, every node carries an annotation slot — attached
//! data that is never serialized and never affects structure (see
//! [`Annotation`]).

mod annotation;
mod node;

pub use annotation::{Annotation, AnnotationKind};
pub use node::NodeKind;

use std::num::NonZeroU32;

use crate::error::ParseError;
use crate::parser::{self, ParseOptions};

/// A typed index into the document's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, meaning it can never be zero
/// and `Option<NodeId>` has the same size as `NodeId` (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// An XML attribute on an element.
///
/// Namespace declarations are represented as ordinary attributes: the
/// default namespace as `name == "xmlns"`, a bound prefix as
/// `prefix == Some("xmlns")` with the bound prefix in `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace prefix, if any (e.g., `"xml"` for `xml:lang`).
    pub prefix: Option<String>,
    /// The attribute's local name (e.g., `"lang"` for `xml:lang`).
    pub name: String,
    /// The attribute value (entity references resolved).
    pub value: String,
}

impl Attribute {
    /// Creates an attribute with no prefix.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a namespace declaration attribute binding `prefix` to `uri`.
    ///
    /// `prefix = None` declares the default namespace (`xmlns="uri"`);
    /// `prefix = Some("a")` declares a bound prefix (`xmlns:a="uri"`).
    #[must_use]
    pub fn namespace_declaration(prefix: Option<&str>, uri: impl Into<String>) -> Self {
        match prefix {
            Some(p) => Self {
                prefix: Some("xmlns".to_string()),
                name: p.to_string(),
                value: uri.into(),
            },
            None => Self {
                prefix: None,
                name: "xmlns".to_string(),
                value: uri.into(),
            },
        }
    }

    /// Returns the namespace binding `(bound prefix, URI)` this attribute
    /// declares, or `None` if it is not a namespace declaration.
    ///
    /// The bound prefix is `None` for the default namespace (`xmlns="uri"`).
    #[must_use]
    pub fn namespace_binding(&self) -> Option<(Option<&str>, &str)> {
        if self.prefix.is_none() && self.name == "xmlns" {
            Some((None, &self.value))
        } else if self.prefix.as_deref() == Some("xmlns") {
            Some((Some(&self.name), &self.value))
        } else {
            None
        }
    }
}

/// Storage for a single node in the document arena.
///
/// Each node stores its kind (element, text, comment, etc.), links to
/// parent, children, and siblings for tree navigation, and any annotations
/// attached to it. Access individual nodes via [`Document::node`].
#[derive(Debug, Clone)]
pub struct NodeData {
    /// What kind of node this is (element, text, comment, etc.) and its payload.
    pub kind: NodeKind,
    /// Parent node, if any. The document node has no parent.
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
    /// Annotations attached to this node, at most one per kind.
    /// Not XML content: never serialized, never compared.
    annotations: Vec<Annotation>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
            annotations: Vec::new(),
        }
    }
}

/// An XML document.
///
/// The `Document` owns all nodes in an arena and provides methods for
/// tree navigation and mutation. All tree operations go through
/// `&Document` (navigation) or `&mut Document` (mutation), so a save —
/// which takes `&Document` — cannot race a mutation on the same thread.
///
/// # Examples
///
/// ```
/// use xylo::Document;
///
/// let doc = Document::parse_str("<root><child/></root>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(doc.node_name(root), Some("root"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The document node id (the container, not the root element).
    root: NodeId,
    /// XML version from the XML declaration (e.g., "1.0").
    pub version: Option<String>,
    /// Encoding from the XML declaration (e.g., "UTF-8").
    pub encoding: Option<String>,
    /// Standalone flag from the XML declaration.
    pub standalone: Option<bool>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// The document contains a single document node with no children.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(16);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document));
        // Index 1: the document node
        nodes.push(NodeData::new(NodeKind::Document));
        let root = NodeId::from_index(1);
        Self {
            nodes,
            root,
            version: None,
            encoding: None,
            standalone: None,
        }
    }

    /// Parses an XML string into a `Document`.
    ///
    /// Whitespace-only text nodes between elements are stripped; use
    /// [`parse_str_with_options`](Document::parse_str_with_options) with
    /// [`ParseOptions::preserve_whitespace`] to keep them.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is not well-formed XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use xylo::Document;
    ///
    /// let doc = Document::parse_str("<root><child/></root>").unwrap();
    /// ```
    pub fn parse_str(input: &str) -> Result<Self, ParseError> {
        parser::parse_str(input, &ParseOptions::default())
    }

    /// Parses an XML string with the given options.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is not well-formed XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use xylo::Document;
    /// use xylo::parser::ParseOptions;
    ///
    /// let opts = ParseOptions::default().preserve_whitespace(true);
    /// let doc = Document::parse_str_with_options("<e> <e2 /> </e>", &opts).unwrap();
    /// ```
    pub fn parse_str_with_options(input: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        parser::parse_str(input, options)
    }

    /// Parses XML from raw bytes, detecting encoding automatically.
    ///
    /// Uses BOM sniffing and XML declaration inspection to determine the
    /// encoding, then transcodes to UTF-8 before parsing. See
    /// [`crate::encoding::decode_to_utf8`] for the detection pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the encoding cannot be determined, the bytes
    /// cannot be transcoded, or the resulting XML is not well-formed.
    pub fn parse_bytes(input: &[u8]) -> Result<Self, ParseError> {
        use crate::encoding::decode_to_utf8;
        use crate::error::SourceLocation;

        let utf8 = decode_to_utf8(input).map_err(|e| ParseError {
            message: e.message,
            location: SourceLocation::default(),
        })?;
        let text = utf8.strip_prefix('\u{FEFF}').unwrap_or(&utf8);
        parser::parse_str(text, &ParseOptions::default())
    }

    /// Returns the document node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root element of the document (the single top-level element).
    ///
    /// Returns `None` if the document has no element children.
    #[must_use]
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .find(|&id| self.node(id).kind.is_element())
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a valid node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    /// Returns a mutable reference to the `NodeData` for the given node.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns the name of a node, if applicable.
    ///
    /// Elements and PIs have names; text, comments, CDATA, and document
    /// nodes return `None`. The name is the local part, without prefix.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. }
            | NodeKind::ProcessingInstruction { target: name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the text content of a text, comment, or CDATA node.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text { content }
            | NodeKind::Comment { content }
            | NodeKind::CData { content } => Some(content),
            NodeKind::ProcessingInstruction { data, .. } => data.as_deref(),
            _ => None,
        }
    }

    /// Returns the concatenated text content of a node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(id, &mut result);
        result
    }

    fn collect_text(&self, id: NodeId, buf: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text { content } | NodeKind::CData { content } => {
                buf.push_str(content);
            }
            _ => {
                for child in self.children(id) {
                    self.collect_text(child, buf);
                }
            }
        }
    }

    /// Returns the attributes of an element node.
    ///
    /// Returns an empty slice for non-element nodes.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns the value of an attribute by local name on an element node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Appends an attribute to an element node.
    ///
    /// If the element already has an attribute with the same prefix and
    /// name, its value is replaced in place (preserving position).
    /// Does nothing on non-element nodes.
    pub fn add_attribute(&mut self, id: NodeId, attr: Attribute) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id).kind {
            if let Some(existing) = attributes
                .iter_mut()
                .find(|a| a.prefix == attr.prefix && a.name == attr.name)
            {
                existing.value = attr.value;
            } else {
                attributes.push(attr);
            }
        }
    }

    /// Returns the first child element with the given local name.
    #[must_use]
    pub fn child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| {
            matches!(&self.node(c).kind, NodeKind::Element { name: n, .. } if n == name)
        })
    }

    // --- Annotations ---

    /// Attaches an annotation to a node.
    ///
    /// A node holds at most one annotation per kind: attaching a value of a
    /// kind the node already carries replaces the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use xylo::tree::Annotation;
    /// use xylo::serial::SaveOptions;
    /// use xylo::Document;
    ///
    /// let mut doc = Document::parse_str("<root/>").unwrap();
    /// let root = doc.root_element().unwrap();
    /// let opts = SaveOptions::default().disable_formatting(true);
    /// doc.add_annotation(root, Annotation::Save(opts));
    /// ```
    pub fn add_annotation(&mut self, id: NodeId, annotation: Annotation) {
        let kind = annotation.kind();
        let annotations = &mut self.node_mut(id).annotations;
        if let Some(existing) = annotations.iter_mut().find(|a| a.kind() == kind) {
            *existing = annotation;
        } else {
            annotations.push(annotation);
        }
    }

    /// Removes all annotations of the given kind from a node.
    ///
    /// Subsequent save-option resolution falls through to the node's
    /// ancestors as if the annotation had never been attached.
    pub fn remove_annotations(&mut self, id: NodeId, kind: AnnotationKind) {
        self.node_mut(id).annotations.retain(|a| a.kind() != kind);
    }

    /// Returns the annotation of the given kind attached to a node, if any.
    #[must_use]
    pub fn annotation(&self, id: NodeId, kind: AnnotationKind) -> Option<&Annotation> {
        self.node(id).annotations.iter().find(|a| a.kind() == kind)
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to the
    /// document node).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Returns an iterator over all descendants of a node (depth-first).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: self.first_child(id),
        }
    }

    // --- Mutation ---

    /// Allocates a new node in the arena and returns its `NodeId`.
    ///
    /// The node starts detached; attach it with
    /// [`append_child`](Document::append_child) or
    /// [`insert_before`](Document::insert_before).
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    /// Allocates a new element node with the given name and no attributes.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Element {
            name: name.into(),
            prefix: None,
            attributes: Vec::new(),
        })
    }

    /// Allocates a new text node.
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Text {
            content: content.into(),
        })
    }

    /// Allocates a new comment node.
    pub fn create_comment(&mut self, content: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Comment {
            content: content.into(),
        })
    }

    /// Allocates a new CDATA section node.
    pub fn create_cdata(&mut self, content: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::CData {
            content: content.into(),
        })
    }

    /// Allocates a new processing instruction node.
    pub fn create_pi(&mut self, target: impl Into<String>, data: Option<String>) -> NodeId {
        self.create_node(NodeKind::ProcessingInstruction {
            target: target.into(),
            data,
        })
    }

    /// Appends a child node to the end of a parent's child list.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `child` already has a parent. Detach it
    /// first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent; detach it first"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }
    }

    /// Inserts `new_child` before `reference` in the parent's child list.
    ///
    /// # Panics
    ///
    /// Panics if `reference` has no parent, or in debug builds if
    /// `new_child` already has a parent.
    #[allow(clippy::expect_used)]
    pub fn insert_before(&mut self, reference: NodeId, new_child: NodeId) {
        debug_assert!(
            self.node(new_child).parent.is_none(),
            "new_child already has a parent; detach it first"
        );

        let parent = self
            .node(reference)
            .parent
            .expect("reference has no parent");
        self.node_mut(new_child).parent = Some(parent);

        if let Some(prev) = self.node(reference).prev_sibling {
            self.node_mut(prev).next_sibling = Some(new_child);
            self.node_mut(new_child).prev_sibling = Some(prev);
        } else {
            self.node_mut(parent).first_child = Some(new_child);
        }

        self.node_mut(new_child).next_sibling = Some(reference);
        self.node_mut(reference).prev_sibling = Some(new_child);
    }

    /// Detaches a node from its parent (but does not free it from the arena).
    ///
    /// Clears the node's parent and sibling links; the node remains
    /// allocated and can be re-attached elsewhere.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };

        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        self.node_mut(id).parent = None;
        self.node_mut(id).prev_sibling = None;
        self.node_mut(id).next_sibling = None;
    }

    /// Returns the total number of nodes in the arena (excluding the
    /// placeholder slot).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}

/// Depth-first iterator over all descendants of a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        // Try to go deeper first
        if let Some(child) = self.doc.first_child(current) {
            self.next = Some(child);
            return Some(current);
        }

        // Try next sibling
        if let Some(sibling) = self.doc.next_sibling(current) {
            self.next = Some(sibling);
            return Some(current);
        }

        // Walk up to find an ancestor with a next sibling
        let mut ancestor = self.doc.parent(current);
        while let Some(anc) = ancestor {
            if anc == self.root {
                self.next = None;
                return Some(current);
            }
            if let Some(sibling) = self.doc.next_sibling(anc) {
                self.next = Some(sibling);
                return Some(current);
            }
            ancestor = self.doc.parent(anc);
        }

        self.next = None;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::SaveOptions;

    #[test]
    fn test_new_document_has_document_node() {
        let doc = Document::new();
        assert!(matches!(doc.node(doc.root()).kind, NodeKind::Document));
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_create_and_append_element() {
        let mut doc = Document::new();
        let root = doc.root();
        let elem = doc.create_element("item");
        doc.append_child(root, elem);

        assert_eq!(doc.first_child(root), Some(elem));
        assert_eq!(doc.last_child(root), Some(elem));
        assert_eq!(doc.parent(elem), Some(root));
        assert_eq!(doc.node_name(elem), Some("item"));
    }

    #[test]
    fn test_append_multiple_children() {
        let mut doc = Document::new();
        let root = doc.root();

        let a = doc.create_text("A");
        let b = doc.create_text("B");
        let c = doc.create_text("C");

        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(root, c);

        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(c));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(b), Some(c));
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.prev_sibling(c), Some(b));
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.prev_sibling(a), None);
    }

    #[test]
    fn test_detach_clears_links() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(root, c);

        doc.detach(b);

        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.prev_sibling(b), None);
        assert_eq!(doc.next_sibling(b), None);
        assert_eq!(doc.next_sibling(a), Some(c));
        assert_eq!(doc.prev_sibling(c), Some(a));
        assert_eq!(doc.children(root).count(), 2);
    }

    #[test]
    fn test_insert_before() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element("a");
        let c = doc.create_element("c");
        doc.append_child(root, a);
        doc.append_child(root, c);

        let b = doc.create_element("b");
        doc.insert_before(c, b);

        let names: Vec<_> = doc
            .children(root)
            .filter_map(|id| doc.node_name(id).map(str::to_string))
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_ancestors_walk() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.create_element("outer");
        let inner = doc.create_element("inner");
        doc.append_child(root, outer);
        doc.append_child(outer, inner);

        let chain: Vec<_> = doc.ancestors(inner).collect();
        assert_eq!(chain, [inner, outer, root]);
    }

    #[test]
    fn test_descendants_order() {
        let doc = Document::parse_str("<a><b><c/></b><d/></a>").unwrap();
        let a = doc.root_element().unwrap();
        let names: Vec<_> = doc
            .descendants(a)
            .filter_map(|id| doc.node_name(id).map(str::to_string))
            .collect();
        assert_eq!(names, ["b", "c", "d"]);
    }

    #[test]
    fn test_add_attribute_replaces_same_name() {
        let mut doc = Document::new();
        let root = doc.root();
        let elem = doc.create_element("e");
        doc.append_child(root, elem);

        doc.add_attribute(elem, Attribute::new("id", "1"));
        doc.add_attribute(elem, Attribute::new("class", "x"));
        doc.add_attribute(elem, Attribute::new("id", "2"));

        assert_eq!(doc.attributes(elem).len(), 2);
        assert_eq!(doc.attribute(elem, "id"), Some("2"));
    }

    #[test]
    fn test_namespace_binding() {
        let default_ns = Attribute::namespace_declaration(None, "urn:d");
        assert_eq!(default_ns.namespace_binding(), Some((None, "urn:d")));

        let bound = Attribute::namespace_declaration(Some("a"), "urn:a");
        assert_eq!(bound.namespace_binding(), Some((Some("a"), "urn:a")));

        let plain = Attribute::new("class", "x");
        assert_eq!(plain.namespace_binding(), None);
    }

    #[test]
    fn test_annotation_add_lookup_remove() {
        let mut doc = Document::parse_str("<root/>").unwrap();
        let root = doc.root_element().unwrap();

        assert!(doc.annotation(root, AnnotationKind::Save).is_none());

        let opts = SaveOptions::default().disable_formatting(true);
        doc.add_annotation(root, Annotation::Save(opts));
        assert_eq!(
            doc.annotation(root, AnnotationKind::Save),
            Some(&Annotation::Save(opts))
        );

        doc.remove_annotations(root, AnnotationKind::Save);
        assert!(doc.annotation(root, AnnotationKind::Save).is_none());
    }

    #[test]
    fn test_annotation_same_kind_replaces() {
        let mut doc = Document::parse_str("<root/>").unwrap();
        let root = doc.root_element().unwrap();

        let first = SaveOptions::default().disable_formatting(true);
        let second = SaveOptions::default().omit_duplicate_namespaces(true);
        doc.add_annotation(root, Annotation::Save(first));
        doc.add_annotation(root, Annotation::Save(second));

        assert_eq!(
            doc.annotation(root, AnnotationKind::Save),
            Some(&Annotation::Save(second))
        );
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse_str("<a>one<b>two</b>three</a>").unwrap();
        let a = doc.root_element().unwrap();
        assert_eq!(doc.text_content(a), "onetwothree");
    }
}
