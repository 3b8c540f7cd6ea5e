//! Callable operations exposed to the host's automation layer

pub mod export_xml;

use serde::{Deserialize, Serialize};

pub use export_xml::ExportDocAsXmlWithVocLabels;

/// Text file artifact returned by an operation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StringBlob {
    pub content: String,
    pub mime_type: String,
    pub encoding: String,
    pub filename: String,
}

impl StringBlob {
    pub fn new(content: String, mime_type: &str, encoding: &str) -> Self {
        Self {
            content,
            mime_type: mime_type.to_string(),
            encoding: encoding.to_string(),
            filename: String::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Registration metadata of an operation
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub id: &'static str,
    pub category: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}
