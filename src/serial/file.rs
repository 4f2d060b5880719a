//! File save target.
//!
//! Wraps serialization to write a named file: an XML declaration naming
//! the destination encoding, a line break (omitted when formatting is
//! disabled), then the serialized content. The destination file is fully
//! replaced; I/O errors surface unchanged. An empty path is an argument
//! error raised before any file-system interaction.
//!
//! Files are always written as UTF-8, and the declaration says so.

use std::fs;
use std::path::Path;

use super::{effective_options, serialize_with_options, SaveOptions};
use crate::error::SaveError;
use crate::tree::{Document, NodeId};

/// The declaration line names the encoding the file is written in.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Saves a node and its subtree to a file, resolving save options from
/// annotations on the node's ancestor chain.
///
/// # Errors
///
/// Returns [`SaveError::EmptyPath`] for an empty path (no write is
/// attempted) or [`SaveError::Io`] if the write fails.
///
/// # Examples
///
/// ```no_run
/// use xylo::serial::save_to_file;
/// use xylo::Document;
///
/// let doc = Document::parse_str("<root/>").unwrap();
/// save_to_file(&doc, doc.root(), "out.xml").unwrap();
/// ```
pub fn save_to_file(
    doc: &Document,
    node: NodeId,
    path: impl AsRef<Path>,
) -> Result<(), SaveError> {
    let options = effective_options(doc, node, None);
    save_resolved(doc, node, path.as_ref(), options)
}

/// Saves a node and its subtree to a file with explicit options, skipping
/// annotation resolution.
///
/// # Errors
///
/// Returns [`SaveError::EmptyPath`] for an empty path (no write is
/// attempted) or [`SaveError::Io`] if the write fails.
pub fn save_to_file_with_options(
    doc: &Document,
    node: NodeId,
    path: impl AsRef<Path>,
    options: SaveOptions,
) -> Result<(), SaveError> {
    save_resolved(doc, node, path.as_ref(), options)
}

fn save_resolved(
    doc: &Document,
    node: NodeId,
    path: &Path,
    options: SaveOptions,
) -> Result<(), SaveError> {
    check_path(path)?;
    let body = serialize_with_options(doc, node, options);
    write_file(path, &body, options.disable_formatting)
}

/// Rejects empty destination paths before any file-system access.
pub(crate) fn check_path(path: &Path) -> Result<(), SaveError> {
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }
    Ok(())
}

/// Writes the declaration plus `body`, fully replacing the file.
pub(crate) fn write_file(
    path: &Path,
    body: &str,
    disable_formatting: bool,
) -> Result<(), SaveError> {
    check_path(path)?;
    let mut content = String::with_capacity(XML_DECLARATION.len() + 2 + body.len());
    content.push_str(XML_DECLARATION);
    if !disable_formatting {
        content.push_str("\r\n");
    }
    content.push_str(body);
    fs::write(path, content)?;
    Ok(())
}
