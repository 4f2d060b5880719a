//! Per-node annotations.
//!
//! An annotation is arbitrary data attached to a node that is not part of
//! XML content: it is never serialized and never affects tree structure or
//! node equality. The serializer consults `Annotation::Save` values when
//! resolving the effective save options for a save call (see
//! [`crate::serial::effective_options`]).
//!
//! Annotation kinds form a closed set. Each node holds at most one live
//! value per kind; attaching a new value of a kind a node already carries
//! replaces the old one.

use crate::serial::SaveOptions;

/// A value attached to a node, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Save options to apply when a save operation starts at or below the
    /// annotated node and no explicit options are passed.
    Save(SaveOptions),
}

impl Annotation {
    /// Returns the kind tag for this annotation.
    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Save(_) => AnnotationKind::Save,
        }
    }
}

/// The kind of an [`Annotation`], used for lookup and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// A [`SaveOptions`] annotation.
    Save,
}
