//! # xylo
//!
//! An in-memory XML document tree with a policy-driven serializer.
//!
//! Documents are arena-backed trees of elements, attributes, text, CDATA,
//! comments, and processing instructions. Serialization — to a string or a
//! file — resolves its formatting and namespace-deduplication policy per
//! save call: an explicit [`serial::SaveOptions`] wins, otherwise the saved
//! node's ancestor chain is searched for an attached save annotation, and
//! failing that the defaults apply. A [`serial::StreamingElement`] produces
//! its content lazily during the save and feeds the same serializer.
//!
//! ## Quick Start
//!
//! ```
//! use xylo::serial::serialize;
//! use xylo::Document;
//!
//! let doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
//! let root = doc.root_element().unwrap();
//! assert_eq!(
//!     serialize(&doc, root),
//!     "<root>\r\n  <child>Hello</child>\r\n</root>"
//! );
//! ```
//!
//! Attaching a save annotation changes how a subtree saves without
//! touching its content:
//!
//! ```
//! use xylo::serial::{serialize, SaveOptions};
//! use xylo::tree::Annotation;
//! use xylo::Document;
//!
//! let mut doc = Document::parse_str("<root><child>Hello</child></root>").unwrap();
//! let root = doc.root_element().unwrap();
//! let opts = SaveOptions::default().disable_formatting(true);
//! doc.add_annotation(root, Annotation::Save(opts));
//! assert_eq!(serialize(&doc, root), "<root><child>Hello</child></root>");
//! ```

pub mod encoding;
pub mod error;
pub mod parser;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use tree::{Attribute, Document, NodeId};
