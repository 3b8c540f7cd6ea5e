//! Renderers module
//!
//! Export logic converting documents into output formats.

pub mod xml;

pub use xml::{ExportError, ExportOptions};
