//! Data model for documents and vocabularies

pub mod document;
pub mod value;
pub mod vocabulary;

pub use document::{Document, Namespace, Property, Schema};
pub use value::{BlobValue, Field, FieldType, SimpleType, Value};
pub use vocabulary::{Vocabulary, VocabularyEntry, VocabularySchema};
