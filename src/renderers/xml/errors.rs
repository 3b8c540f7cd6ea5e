//! Error types for XML export
//!
//! Only these errors abort an export. Problems resolving vocabulary labels
//! are reported as [`LabelIssue`](super::voc_labels::LabelIssue) and never
//! surface here.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    /// The XML writer failed
    #[error("XML serialization failed: {0}")]
    Xml(String),

    /// A value does not fit the type declared by its field
    #[error("invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ExportError>;

pub(crate) fn xml_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Xml(err.to_string())
}
