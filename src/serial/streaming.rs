//! Streaming (lazily produced) elements.
//!
//! A [`StreamingElement`] is an element-like value whose attributes and
//! children come from producer closures instead of a materialized subtree.
//! Each save invokes the producers exactly once, in declared order, and
//! drives every produced item straight through the same emission logic as
//! tree serialization — nothing produced is retained. Re-saving invokes
//! the producers freshly, which is why they are `Fn` rather than `FnOnce`.
//!
//! Streaming elements carry no annotations; a save applies the explicit
//! options it is given, or the defaults.

use super::emitter::Emitter;
use super::file::{check_path, write_file};
use super::xml::write_node;
use super::SaveOptions;
use crate::error::SaveError;
use crate::tree::{Attribute, Document, NodeId};
use std::path::Path;

/// A child produced by a streaming element.
pub enum StreamingNode<'d> {
    /// A materialized subtree, streamed from its document.
    Tree(&'d Document, NodeId),
    /// A nested streaming element; laziness composes.
    Element(StreamingElement<'d>),
    /// A text node.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
    /// A processing instruction.
    Pi {
        /// The PI target.
        target: String,
        /// The PI data, if any.
        data: Option<String>,
    },
}

type AttributeProducer<'d> = Box<dyn Fn() -> Box<dyn Iterator<Item = Attribute> + 'd> + 'd>;
type ChildProducer<'d> = Box<dyn Fn() -> Box<dyn Iterator<Item = StreamingNode<'d>> + 'd> + 'd>;

/// An element whose content is produced on demand during serialization.
///
/// # Examples
///
/// ```
/// use xylo::serial::{StreamingElement, StreamingNode};
/// use xylo::Document;
///
/// let doc = Document::parse_str("<items><item>1</item><item>2</item></items>").unwrap();
/// let items = doc.root_element().unwrap();
///
/// let wrapper = StreamingElement::new("wrapper").children_with(|| {
///     doc.children(items)
///         .map(|c| StreamingNode::Tree(&doc, c))
///         .collect::<Vec<_>>()
/// });
/// assert_eq!(
///     wrapper.serialize(),
///     "<wrapper>\r\n  <item>1</item>\r\n  <item>2</item>\r\n</wrapper>"
/// );
/// ```
pub struct StreamingElement<'d> {
    name: String,
    prefix: Option<String>,
    attributes: AttributeProducer<'d>,
    children: ChildProducer<'d>,
}

impl<'d> StreamingElement<'d> {
    /// Creates a streaming element with the given name and no content.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes: Box::new(|| Box::new(std::iter::empty())),
            children: Box::new(|| Box::new(std::iter::empty())),
        }
    }

    /// Sets the namespace prefix for the element name.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the attribute producer.
    ///
    /// Invoked once per save; the produced attributes are written in
    /// iteration order.
    #[must_use]
    pub fn attributes_with<F, I>(mut self, produce: F) -> Self
    where
        F: Fn() -> I + 'd,
        I: IntoIterator<Item = Attribute>,
        I::IntoIter: 'd,
    {
        self.attributes = Box::new(move || Box::new(produce().into_iter()));
        self
    }

    /// Sets the child producer.
    ///
    /// Invoked once per save; each produced child is serialized and
    /// dropped before the next is pulled.
    #[must_use]
    pub fn children_with<F, I>(mut self, produce: F) -> Self
    where
        F: Fn() -> I + 'd,
        I: IntoIterator<Item = StreamingNode<'d>>,
        I::IntoIter: 'd,
    {
        self.children = Box::new(move || Box::new(produce().into_iter()));
        self
    }

    /// Serializes this element with default options.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.serialize_with_options(SaveOptions::default())
    }

    /// Serializes this element with explicit options.
    #[must_use]
    pub fn serialize_with_options(&self, options: SaveOptions) -> String {
        let mut emitter = Emitter::new(options);
        self.write(options.omit_duplicate_namespaces, &mut emitter);
        emitter.finish()
    }

    /// Saves this element to a file with default options.
    ///
    /// Writes an XML declaration naming the destination encoding, then the
    /// serialized content. The file is fully replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::EmptyPath`] for an empty path (before any
    /// file-system access) or [`SaveError::Io`] if the write fails.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.save_to_file_with_options(path, SaveOptions::default())
    }

    /// Saves this element to a file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::EmptyPath`] for an empty path (before any
    /// file-system access) or [`SaveError::Io`] if the write fails.
    pub fn save_to_file_with_options(
        &self,
        path: impl AsRef<Path>,
        options: SaveOptions,
    ) -> Result<(), SaveError> {
        // Argument check comes first: an empty path must fail before the
        // producers are evaluated.
        check_path(path.as_ref())?;
        let body = self.serialize_with_options(options);
        write_file(path.as_ref(), &body, options.disable_formatting)
    }

    fn write(&self, omit_duplicates: bool, emitter: &mut Emitter) {
        emitter.start_element(self.prefix.as_deref(), &self.name);
        for attr in (self.attributes)() {
            emitter.attribute(attr.prefix.as_deref(), &attr.name, &attr.value);
        }
        for child in (self.children)() {
            match child {
                StreamingNode::Tree(doc, id) => {
                    write_node(doc, id, id, omit_duplicates, emitter);
                }
                StreamingNode::Element(element) => {
                    element.write(omit_duplicates, emitter);
                }
                StreamingNode::Text(content) => emitter.text(&content),
                StreamingNode::CData(content) => emitter.cdata(&content),
                StreamingNode::Comment(content) => emitter.comment(&content),
                StreamingNode::Pi { target, data } => emitter.pi(&target, data.as_deref()),
            }
        }
        emitter.end_element();
    }
}
