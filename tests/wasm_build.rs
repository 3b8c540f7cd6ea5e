//! WASM build test
//!
//! Checks that the JavaScript-facing export functions work from a browser.

#![cfg(target_arch = "wasm32")]

use vocab_xml_export::api::{export_document_as_xml, export_document_as_xml_with_voc_labels};
use vocab_xml_export::models::{Document, Field, Namespace, Schema, Value, Vocabulary};
use vocab_xml_export::operations::StringBlob;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn report() -> Document {
    Document::new("Report").with_schema(
        Schema::new("mydoc", Namespace::new("my", "http://example.com/schemas/mydoc")).with_property(
            Field::string("department_voc_Department"),
            Some(Value::from("acct")),
        ),
    )
}

#[wasm_bindgen_test]
fn test_export_with_voc_labels() {
    let document = serde_wasm_bindgen::to_value(&report()).unwrap();
    let vocabularies = serde_wasm_bindgen::to_value(&vec![
        Vocabulary::new("Department").with_entry("acct", "Accounting Services")
    ])
    .unwrap();

    let result = export_document_as_xml_with_voc_labels(document, vocabularies).unwrap();
    let blob: StringBlob = serde_wasm_bindgen::from_value(result).unwrap();

    assert_eq!(blob.filename, "Report.xml");
    assert!(blob.content.contains("Accounting Services"));
}

#[wasm_bindgen_test]
fn test_invalid_document_is_rejected() {
    let result = export_document_as_xml_with_voc_labels(
        wasm_bindgen::JsValue::from_str("not a document"),
        wasm_bindgen::JsValue::NULL,
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_standard_export_is_indented_on_request() {
    let document = serde_wasm_bindgen::to_value(&report()).unwrap();
    let xml = export_document_as_xml(document, 2).unwrap();
    assert!(xml.contains("\n    <my:department_voc_Department>acct</my:department_voc_Department>"));
    assert!(!xml.contains("_vocabularyLabel"));
}
