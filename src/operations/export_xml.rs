//! Export a document as XML with vocabulary labels

use super::{OperationDescriptor, StringBlob};
use crate::directory::DirectoryService;
use crate::models::Document;
use crate::renderers::xml::{ExportOptions, Result, VocabularyLabelExporter};

pub const XML_MIME_TYPE: &str = "text/xml";
pub const UTF_8: &str = "UTF-8";

/// Operation producing the standard XML export plus vocabulary labels
///
/// The output is the same as the platform's XML export, but every simple
/// field named `<field>_voc_<Vocabulary>` is followed by a
/// `<field>_voc_<Vocabulary>_vocabularyLabel` element holding the label of
/// the stored entry.
pub struct ExportDocAsXmlWithVocLabels<'d> {
    directory: &'d dyn DirectoryService,
    options: ExportOptions,
}

impl<'d> ExportDocAsXmlWithVocLabels<'d> {
    pub const ID: &'static str = "ExportDocAsXMLWithVocLabelsOp";

    pub fn new(directory: &'d dyn DirectoryService) -> Self {
        Self {
            directory,
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn descriptor() -> OperationDescriptor {
        OperationDescriptor {
            id: Self::ID,
            category: "Conversion",
            label: "Export document as XML with voc. labels",
            description: "Generates an XML export of all the document's properties, identical to \
                the standard XML export, plus the labels of vocabulary-bound fields. A field is \
                bound to a vocabulary when its name ends with _voc_<vocabulary name>, e.g. \
                color_voc_Colors. The label is added right after the field value, as a field \
                with the _vocabularyLabel suffix.",
        }
    }

    /// Export one document as `<title>.xml`
    pub fn run(&self, input: &Document) -> Result<StringBlob> {
        let exporter = VocabularyLabelExporter::with_options(input, self.directory, &self.options)?;
        let xml = exporter.xml()?;

        log::debug!(
            "exported '{}' as XML ({} bytes, {} labels skipped)",
            input.title,
            xml.len(),
            exporter.issues().len()
        );

        Ok(StringBlob::new(xml, XML_MIME_TYPE, UTF_8).with_filename(format!("{}.xml", input.title)))
    }

    /// Export each document in order, one blob per document
    pub fn run_all(&self, inputs: &[Document]) -> Result<Vec<StringBlob>> {
        inputs.iter().map(|doc| self.run(doc)).collect()
    }
}
