//! Controlled vocabularies
//!
//! A vocabulary is a small directory of `id -> label` entries. Flat
//! vocabularies use the `vocabulary` schema; hierarchical ones use
//! `xvocabulary` and carry a parent id on each entry.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VocabularySchema {
    #[default]
    Vocabulary,
    Xvocabulary,
}

impl VocabularySchema {
    pub fn name(&self) -> &'static str {
        match self {
            VocabularySchema::Vocabulary => "vocabulary",
            VocabularySchema::Xvocabulary => "xvocabulary",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VocabularyEntry {
    pub id: String,
    pub label: String,
    /// Parent entry id, hierarchical vocabularies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default)]
    pub ordering: i64,
}

impl VocabularyEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent: None,
            obsolete: false,
            ordering: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vocabulary {
    pub name: String,
    #[serde(default)]
    pub schema: VocabularySchema,
    #[serde(default)]
    pub entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: VocabularySchema::Vocabulary,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(VocabularyEntry::new(id, label));
        self
    }

    pub fn entry(&self, id: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
