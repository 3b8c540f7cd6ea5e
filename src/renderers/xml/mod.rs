//! XML export of documents
//!
//! # Module Structure
//!
//! - **tree**: append-only element tree built during the walk
//! - **writer**: quick-xml serialization of the tree
//! - **standard**: schema/property walker and the baseline property writer
//! - **voc_labels**: property writer adding vocabulary labels
//! - **errors**: fatal export errors

pub mod errors;
pub mod standard;
pub mod tree;
pub mod voc_labels;
pub mod writer;

use serde::{Deserialize, Serialize};

pub use errors::{ExportError, Result};
pub use standard::{
    export_document, export_standard_xml, write_standard_property, ExportedDocument,
    PropertyWriter, StandardProperties,
};
pub use tree::{QName, XmlElement, XmlNode};
pub use voc_labels::{
    lookup_label, vocabulary_binding, LabelIssue, LabelLookup, VocabularyBinding,
    VocabularyLabelExporter, VocabularyLabelWriter, LABEL_ELEMENT_SUFFIX, VOCABULARY_TAG,
};

/// Options for a single export
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write blob content as base64 instead of a digest reference
    #[serde(default)]
    pub inline_blobs: bool,
    /// Indent nested elements by this many spaces; compact output when unset
    #[serde(default)]
    pub indent: Option<usize>,
}
