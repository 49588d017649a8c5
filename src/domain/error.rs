//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed hierarchy manifests.
/// Evaluating an already built hierarchy or chain never fails.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("manifest contains no entries")]
    EmptyManifest,

    #[error("duplicate entry name: {0}")]
    DuplicateName(String),

    #[error("entry {child} names unknown parent: {parent}")]
    UnknownParent { child: String, parent: String },

    #[error("entry {child} names leaf {parent} as parent")]
    LeafAsParent { child: String, parent: String },

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },
}
