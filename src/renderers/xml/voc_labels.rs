//! Vocabulary labels in the XML export
//!
//! The standard export writes the raw value stored in a field. When a field
//! is bound to a vocabulary, the stored value is an entry id and readers
//! usually want the entry's label too. There is no schema metadata saying
//! which vocabulary a field uses, so the binding is carried by the field
//! name:
//!
//! ```text
//! main_department_voc_Department
//! |-------------|----|----------|
//!   field name   tag  vocabulary
//! ```
//!
//! For such a field the export gets one extra sibling element right after
//! the field's own element, named like the field with a `_vocabularyLabel`
//! suffix, holding the label as CDATA:
//!
//! ```xml
//! <my:main_department_voc_Department>acct</my:main_department_voc_Department>
//! <my:main_department_voc_Department_vocabularyLabel><![CDATA[Accounting Services]]></my:main_department_voc_Department_vocabularyLabel>
//! ```
//!
//! Label problems never fail the export. They are logged and collected as
//! [`LabelIssue`]s, and the label element is left out.

use thiserror::Error;

use super::errors::Result;
use super::standard::{export_document, write_standard_property, ExportedDocument, PropertyWriter};
use super::tree::{QName, XmlElement};
use super::ExportOptions;
use crate::directory::{DirectoryEntry, DirectoryError, DirectoryService, DirectorySession};
use crate::models::{Document, Field, Namespace, Value};

/// Tag separating the field name from the vocabulary name
pub const VOCABULARY_TAG: &str = "_voc_";

/// Suffix of the element carrying the label
pub const LABEL_ELEMENT_SUFFIX: &str = "_vocabularyLabel";

/// Attribute of a vocabulary entry holding its label
pub const LABEL_ATTRIBUTE: &str = "label";

/// What a field name says about its vocabulary binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyBinding<'a> {
    /// No tag, or nothing before the tag
    Unbound,
    /// Tag present with nothing after it
    Malformed,
    Vocabulary(&'a str),
}

/// Read the vocabulary binding from a field name
pub fn vocabulary_binding(field_name: &str) -> VocabularyBinding<'_> {
    match field_name.find(VOCABULARY_TAG) {
        Some(pos) if pos > 0 => match &field_name[pos + VOCABULARY_TAG.len()..] {
            "" => VocabularyBinding::Malformed,
            vocabulary => VocabularyBinding::Vocabulary(vocabulary),
        },
        _ => VocabularyBinding::Unbound,
    }
}

/// Outcome of a label lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LabelLookup {
    Found(String),
    VocabularyNotFound,
    EntryNotFound,
    Failed(DirectoryError),
}

/// A label that could not be added to the export
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LabelIssue {
    #[error("found tag \"_voc_\" in field name {field}, but no vocabulary name after the tag")]
    MalformedTag { field: String },

    #[error("vocabulary '{vocabulary}' not found (field {field})")]
    UnknownVocabulary { field: String, vocabulary: String },

    #[error("entry id <{entry}> not found in vocabulary {vocabulary} (field {field})")]
    UnknownEntry {
        field: String,
        vocabulary: String,
        entry: String,
    },

    #[error("label lookup in vocabulary {vocabulary} failed (field {field}): {error}")]
    LookupFailed {
        field: String,
        vocabulary: String,
        error: DirectoryError,
    },
}

/// Closes the session when dropped, whatever path left the lookup
struct SessionGuard<'a> {
    session: Option<Box<dyn DirectorySession + 'a>>,
}

impl<'a> SessionGuard<'a> {
    fn new(session: Box<dyn DirectorySession + 'a>) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn get_entry(&self, id: &str) -> std::result::Result<Option<DirectoryEntry>, DirectoryError> {
        match &self.session {
            Some(session) => session.get_entry(id),
            None => Ok(None),
        }
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let directory = session.directory_name().to_string();
            if let Err(err) = session.close() {
                log::warn!("ignoring failure to close session on '{}': {}", directory, err);
            }
        }
    }
}

/// Look up the label of `entry_id` in `vocabulary`
///
/// Opens one session and always releases it before returning.
pub fn lookup_label(directory: &dyn DirectoryService, vocabulary: &str, entry_id: &str) -> LabelLookup {
    let session = match directory.open(vocabulary) {
        Ok(Some(session)) => SessionGuard::new(session),
        Ok(None) => return LabelLookup::VocabularyNotFound,
        Err(err) => return LabelLookup::Failed(err),
    };

    let found = session.get_entry(entry_id);
    match found {
        Ok(Some(entry)) => match entry_label(vocabulary, &entry) {
            Ok(label) => LabelLookup::Found(label),
            Err(err) => LabelLookup::Failed(err),
        },
        Ok(None) => LabelLookup::EntryNotFound,
        Err(err) => LabelLookup::Failed(err),
    }
}

fn entry_label(vocabulary: &str, entry: &DirectoryEntry) -> std::result::Result<String, DirectoryError> {
    let malformed = |reason: &str| DirectoryError::MalformedEntry {
        directory: vocabulary.to_string(),
        id: entry.id.clone(),
        reason: reason.to_string(),
    };

    let model = entry
        .first_data_model()
        .ok_or_else(|| malformed("entry has no data"))?;
    match model.get_data(LABEL_ATTRIBUTE) {
        Some(Value::String(label)) => Ok(label.clone()),
        Some(_) => Err(malformed("label is not a string")),
        None => Err(malformed("entry has no label")),
    }
}

/// Property writer adding vocabulary labels after the standard output
pub struct VocabularyLabelWriter<'d> {
    directory: &'d dyn DirectoryService,
    issues: Vec<LabelIssue>,
}

impl<'d> VocabularyLabelWriter<'d> {
    pub fn new(directory: &'d dyn DirectoryService) -> Self {
        Self {
            directory,
            issues: Vec::new(),
        }
    }

    pub fn issues(&self) -> &[LabelIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<LabelIssue> {
        self.issues
    }

    fn record(&mut self, issue: LabelIssue) {
        log::error!("{}", issue);
        self.issues.push(issue);
    }

    fn resolve_label(&mut self, field: &Field, value: &Value) -> Option<String> {
        let vocabulary = match vocabulary_binding(&field.name) {
            VocabularyBinding::Unbound => return None,
            VocabularyBinding::Malformed => {
                self.record(LabelIssue::MalformedTag {
                    field: field.name.clone(),
                });
                return None;
            }
            VocabularyBinding::Vocabulary(vocabulary) => vocabulary,
        };

        let entry = value.to_text()?;
        match lookup_label(self.directory, vocabulary, &entry) {
            LabelLookup::Found(label) => Some(label),
            LabelLookup::VocabularyNotFound => {
                self.record(LabelIssue::UnknownVocabulary {
                    field: field.name.clone(),
                    vocabulary: vocabulary.to_string(),
                });
                None
            }
            LabelLookup::EntryNotFound => {
                self.record(LabelIssue::UnknownEntry {
                    field: field.name.clone(),
                    vocabulary: vocabulary.to_string(),
                    entry,
                });
                None
            }
            LabelLookup::Failed(error) => {
                self.record(LabelIssue::LookupFailed {
                    field: field.name.clone(),
                    vocabulary: vocabulary.to_string(),
                    error,
                });
                None
            }
        }
    }
}

impl PropertyWriter for VocabularyLabelWriter<'_> {
    fn write_property(
        &mut self,
        parent: &mut XmlElement,
        namespace: &Namespace,
        field: &Field,
        value: Option<&Value>,
        inline_blobs: bool,
    ) -> Result<()> {
        write_standard_property(self, parent, namespace, field, value, inline_blobs)?;

        let Some(value) = value else {
            return Ok(());
        };
        if !field.field_type.is_simple() {
            return Ok(());
        }

        if let Some(label) = self.resolve_label(field, value) {
            parent
                .add_element(QName::get(
                    format!("{}{}", field.name, LABEL_ELEMENT_SUFFIX),
                    &namespace.prefix,
                    &namespace.uri,
                ))
                .add_cdata(label);
        }
        Ok(())
    }
}

/// XML export of one document with vocabulary labels
///
/// Construction runs the whole export; the instance then only hands out the
/// result.
#[derive(Debug, Clone)]
pub struct VocabularyLabelExporter {
    exported: ExportedDocument,
    issues: Vec<LabelIssue>,
}

impl VocabularyLabelExporter {
    pub fn new(document: &Document, directory: &dyn DirectoryService) -> Result<Self> {
        Self::with_options(document, directory, &ExportOptions::default())
    }

    pub fn with_options(
        document: &Document,
        directory: &dyn DirectoryService,
        options: &ExportOptions,
    ) -> Result<Self> {
        let mut writer = VocabularyLabelWriter::new(directory);
        let exported = export_document(document, &mut writer, options)?;
        Ok(Self {
            exported,
            issues: writer.into_issues(),
        })
    }

    pub fn xml(&self) -> Result<String> {
        self.exported.as_xml()
    }

    pub fn exported(&self) -> &ExportedDocument {
        &self.exported
    }

    /// Labels that were left out, in export order
    pub fn issues(&self) -> &[LabelIssue] {
        &self.issues
    }
}
