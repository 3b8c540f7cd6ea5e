//! Export operations for the WASM API
//!
//! - XML with vocabulary labels: the document's XML export, plus labels of
//!   vocabulary-bound fields, returned as a file blob
//! - Standard XML: the baseline export, returned as a string

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, export_error, serialize};
use crate::directory::InMemoryDirectoryService;
use crate::models::{Document, Vocabulary};
use crate::operations::ExportDocAsXmlWithVocLabels;
use crate::renderers::xml::{export_standard_xml, ExportOptions};
use crate::{wasm_info, wasm_log, wasm_warn};

// ============================================================================
// XML Export With Vocabulary Labels
// ============================================================================

/// Export a document as XML with vocabulary labels
///
/// # Parameters
/// - `document`: the document (schemas, fields, values)
/// - `vocabularies`: array of vocabularies used to resolve labels
///
/// # Returns
/// `{ content, mimeType, encoding, filename }`
#[wasm_bindgen(js_name = exportDocumentAsXmlWithVocLabels)]
pub fn export_document_as_xml_with_voc_labels(
    document: JsValue,
    vocabularies: JsValue,
) -> Result<JsValue, JsValue> {
    wasm_info!("exportDocumentAsXmlWithVocLabels called");

    let document: Document = deserialize(document, "Invalid document")?;
    let vocabularies: Vec<Vocabulary> = deserialize(vocabularies, "Invalid vocabularies")?;
    wasm_log!(
        "  Document '{}' has {} schemas, {} vocabularies available",
        document.title,
        document.schemas.len(),
        vocabularies.len()
    );

    let directory = InMemoryDirectoryService::from_vocabularies(vocabularies);
    let blob = ExportDocAsXmlWithVocLabels::new(&directory)
        .run(&document)
        .map_err(|e| export_error("XML export error", e))?;

    if directory.open_sessions() != 0 {
        wasm_warn!("{} vocabulary sessions left open", directory.open_sessions());
    }
    wasm_info!("  {} generated: {} bytes", blob.filename, blob.len());

    serialize(&blob, "Failed to serialize export blob")
}

// ============================================================================
// Standard XML Export
// ============================================================================

/// Export a document as standard XML (no vocabulary labels)
///
/// # Parameters
/// - `indent`: spaces per nesting level, 0 for compact output
#[wasm_bindgen(js_name = exportDocumentAsXml)]
pub fn export_document_as_xml(document: JsValue, indent: usize) -> Result<String, JsValue> {
    wasm_info!("exportDocumentAsXml called");

    let document: Document = deserialize(document, "Invalid document")?;
    let options = ExportOptions {
        indent: (indent > 0).then_some(indent),
        ..ExportOptions::default()
    };

    let xml = export_standard_xml(&document, &options).map_err(|e| export_error("XML export error", e))?;
    wasm_info!("  XML generated: {} bytes", xml.len());

    Ok(xml)
}
