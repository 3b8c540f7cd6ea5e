//! Directory lookup seam
//!
//! The export only needs four things from a directory service: open a
//! session on a named directory, fetch an entry by id, read an attribute
//! from the entry's data, and close the session. [`DirectoryService`] and
//! [`DirectorySession`] capture exactly that; [`memory`] provides an
//! in-memory implementation backed by vocabularies loaded through
//! [`catalog`].

pub mod catalog;
pub mod memory;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::Value;

pub use catalog::{CatalogError, VocabularyCatalog};
pub use memory::InMemoryDirectoryService;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    /// The service itself cannot be reached
    #[error("directory service unavailable: {0}")]
    Unavailable(String),

    /// A session failed while reading or closing
    #[error("directory session error on '{directory}': {reason}")]
    Session { directory: String, reason: String },

    /// An entry exists but does not carry the expected data
    #[error("malformed entry <{id}> in directory '{directory}': {reason}")]
    MalformedEntry {
        directory: String,
        id: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Attribute values of an entry under one schema
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    pub schema: String,
    pub data: BTreeMap<String, Value>,
}

impl DataModel {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// One row of a directory
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub id: String,
    pub data_models: Vec<DataModel>,
}

impl DirectoryEntry {
    /// The entry's primary data record
    pub fn first_data_model(&self) -> Option<&DataModel> {
        self.data_models.first()
    }
}

/// A read session opened on a single directory
pub trait DirectorySession {
    fn directory_name(&self) -> &str;

    /// `Ok(None)` when no entry has this id
    fn get_entry(&self, id: &str) -> Result<Option<DirectoryEntry>>;

    fn close(self: Box<Self>) -> Result<()>;
}

pub trait DirectoryService {
    /// Open a session on `directory`; `Ok(None)` when no such directory exists
    fn open(&self, directory: &str) -> Result<Option<Box<dyn DirectorySession + '_>>>;
}
