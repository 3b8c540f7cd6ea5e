//! In-memory directory service over a set of vocabularies

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DataModel, DirectoryEntry, DirectoryService, DirectorySession, Result};
use crate::models::{Value, Vocabulary, VocabularyEntry, VocabularySchema};

/// Directory service answering from vocabularies held in memory
///
/// Keeps a count of sessions that were opened but not yet closed, so callers
/// can check that every lookup released its session.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryService {
    vocabularies: HashMap<String, Vocabulary>,
    open_sessions: AtomicUsize,
    total_opened: AtomicUsize,
}

impl InMemoryDirectoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vocabularies(vocabularies: impl IntoIterator<Item = Vocabulary>) -> Self {
        let mut service = Self::new();
        for vocabulary in vocabularies {
            service.insert(vocabulary);
        }
        service
    }

    /// Register a vocabulary, replacing any previous one with the same name
    pub fn insert(&mut self, vocabulary: Vocabulary) {
        self.vocabularies.insert(vocabulary.name.clone(), vocabulary);
    }

    pub fn vocabulary(&self, name: &str) -> Option<&Vocabulary> {
        self.vocabularies.get(name)
    }

    /// Sessions currently open
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    /// Sessions opened since creation
    pub fn total_opened(&self) -> usize {
        self.total_opened.load(Ordering::SeqCst)
    }
}

impl DirectoryService for InMemoryDirectoryService {
    fn open(&self, directory: &str) -> Result<Option<Box<dyn DirectorySession + '_>>> {
        let Some(vocabulary) = self.vocabularies.get(directory) else {
            return Ok(None);
        };

        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        self.total_opened.fetch_add(1, Ordering::SeqCst);
        log::debug!("opened session on vocabulary '{}'", directory);

        Ok(Some(Box::new(VocabularySession {
            service: self,
            vocabulary,
        })))
    }
}

struct VocabularySession<'a> {
    service: &'a InMemoryDirectoryService,
    vocabulary: &'a Vocabulary,
}

impl DirectorySession for VocabularySession<'_> {
    fn directory_name(&self) -> &str {
        &self.vocabulary.name
    }

    fn get_entry(&self, id: &str) -> Result<Option<DirectoryEntry>> {
        Ok(self
            .vocabulary
            .entry(id)
            .map(|entry| entry_to_directory_entry(self.vocabulary.schema, entry)))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.service.open_sessions.fetch_sub(1, Ordering::SeqCst);
        log::debug!("closed session on vocabulary '{}'", self.vocabulary.name);
        Ok(())
    }
}

fn entry_to_directory_entry(schema: VocabularySchema, entry: &VocabularyEntry) -> DirectoryEntry {
    let mut model = DataModel::new(schema.name());
    model.data.insert("id".to_string(), Value::from(entry.id.as_str()));
    model.data.insert("label".to_string(), Value::from(entry.label.as_str()));
    model.data.insert("obsolete".to_string(), Value::Boolean(entry.obsolete));
    model.data.insert("ordering".to_string(), Value::Integer(entry.ordering));
    if schema == VocabularySchema::Xvocabulary {
        if let Some(parent) = &entry.parent {
            model.data.insert("parent".to_string(), Value::from(parent.as_str()));
        }
    }

    DirectoryEntry {
        id: entry.id.clone(),
        data_models: vec![model],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departments() -> InMemoryDirectoryService {
        InMemoryDirectoryService::from_vocabularies([Vocabulary::new("Department")
            .with_entry("acct", "Accounting Services")
            .with_entry("hr", "Human Resources")])
    }

    #[test]
    fn test_unknown_directory_opens_nothing() {
        let service = departments();
        assert!(service.open("Colors").unwrap().is_none());
        assert_eq!(service.total_opened(), 0);
    }

    #[test]
    fn test_session_lookup_and_release() {
        let service = departments();
        let session = service.open("Department").unwrap().unwrap();
        assert_eq!(service.open_sessions(), 1);
        assert_eq!(session.directory_name(), "Department");

        let entry = session.get_entry("hr").unwrap().unwrap();
        let model = entry.first_data_model().unwrap();
        assert_eq!(model.schema, "vocabulary");
        assert_eq!(model.get_data("label"), Some(&Value::from("Human Resources")));
        assert!(session.get_entry("nope").unwrap().is_none());

        session.close().unwrap();
        assert_eq!(service.open_sessions(), 0);
        assert_eq!(service.total_opened(), 1);
    }

    #[test]
    fn test_hierarchical_entry_carries_parent() {
        let mut vocabulary = Vocabulary::new("Subtopic");
        vocabulary.schema = VocabularySchema::Xvocabulary;
        let mut entry = VocabularyEntry::new("rust", "Rust");
        entry.parent = Some("languages".to_string());
        vocabulary.entries.push(entry);

        let service = InMemoryDirectoryService::from_vocabularies([vocabulary]);
        let session = service.open("Subtopic").unwrap().unwrap();
        let entry = session.get_entry("rust").unwrap().unwrap();
        let model = entry.first_data_model().unwrap();
        assert_eq!(model.schema, "xvocabulary");
        assert_eq!(model.get_data("parent"), Some(&Value::from("languages")));
        session.close().unwrap();
    }
}
