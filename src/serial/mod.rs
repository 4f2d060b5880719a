//! XML serialization.
//!
//! This module turns a `Document` subtree — or a lazily produced
//! [`StreamingElement`] — back into XML text, and writes it to files.
//! Output formatting and namespace-declaration deduplication are governed
//! by [`SaveOptions`], resolved per save call from an explicit argument or
//! from annotations on the saved node's ancestor chain.

mod emitter;
mod file;
mod options;
pub mod scope;
mod streaming;
mod xml;

pub use file::{save_to_file, save_to_file_with_options};
pub use options::{effective_options, SaveOptions};
pub use scope::{in_scope_bindings, lookup_namespace, namespace_uri};
pub use streaming::{StreamingElement, StreamingNode};
pub use xml::{
    serialize, serialize_document, serialize_document_with_options, serialize_with_options,
};
