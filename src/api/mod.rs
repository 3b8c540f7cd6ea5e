//! WASM API
//!
//! JavaScript-facing entry points. Inputs are plain JS objects converted
//! with serde-wasm-bindgen.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serialization and error conversion
//! - `export`: document export functions

pub mod helpers;
pub mod export;

pub use export::{export_document_as_xml, export_document_as_xml_with_voc_labels};
