//! Document XML export with vocabulary labels
//!
//! Exports a document's properties as XML, the same way the standard export
//! does, and adds the human-readable label of every field bound to a
//! vocabulary through the `<field>_voc_<Vocabulary>` naming convention.

pub mod api;
pub mod directory;
pub mod models;
pub mod operations;
pub mod renderers;

// Re-export commonly used types
pub use directory::{DirectoryService, InMemoryDirectoryService, VocabularyCatalog};
pub use models::*;
pub use operations::{ExportDocAsXmlWithVocLabels, StringBlob};
pub use renderers::xml::{ExportOptions, VocabularyLabelExporter};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger may already be installed by the host page
    #[cfg(feature = "console_log")]
    {
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    log::info!("Vocabulary label XML export WASM module initialized");
}
