//! Vocabulary catalogs loaded from configuration files
//!
//! A catalog is a YAML or JSON file listing vocabularies and their entries:
//!
//! ```yaml
//! vocabularies:
//!   - name: Department
//!     entries:
//!       - { id: acct, label: Accounting Services }
//!       - { id: hr, label: Human Resources }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::memory::InMemoryDirectoryService;
use crate::models::Vocabulary;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("vocabulary '{0}' is defined more than once")]
    DuplicateVocabulary(String),

    #[error("entry id '{id}' appears more than once in vocabulary '{vocabulary}'")]
    DuplicateEntry { vocabulary: String, id: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct VocabularyCatalog {
    #[serde(default)]
    pub vocabularies: Vec<Vocabulary>,
}

impl VocabularyCatalog {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, choosing the parser from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let catalog = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        log::info!(
            "loaded {} vocabularies from {}",
            catalog.vocabularies.len(),
            path.display()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        for vocabulary in &self.vocabularies {
            if !names.insert(vocabulary.name.as_str()) {
                return Err(CatalogError::DuplicateVocabulary(vocabulary.name.clone()));
            }

            let mut ids = HashSet::new();
            for entry in &vocabulary.entries {
                if !ids.insert(entry.id.as_str()) {
                    return Err(CatalogError::DuplicateEntry {
                        vocabulary: vocabulary.name.clone(),
                        id: entry.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn into_service(self) -> InMemoryDirectoryService {
        InMemoryDirectoryService::from_vocabularies(self.vocabularies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG_YAML: &str = r#"
vocabularies:
  - name: Department
    entries:
      - { id: acct, label: Accounting Services }
      - { id: hr, label: Human Resources, ordering: 2 }
  - name: Subtopic
    schema: xvocabulary
    entries:
      - { id: rust, label: Rust, parent: languages }
"#;

    #[test]
    fn test_yaml_catalog() {
        let catalog = VocabularyCatalog::from_yaml_str(CATALOG_YAML).unwrap();
        assert_eq!(catalog.vocabularies.len(), 2);
        assert_eq!(catalog.vocabularies[0].entries[1].ordering, 2);

        let service = catalog.into_service();
        let subtopic = service.vocabulary("Subtopic").unwrap();
        assert_eq!(subtopic.entry("rust").unwrap().parent.as_deref(), Some("languages"));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let yaml = r#"
vocabularies:
  - name: Department
    entries:
      - { id: acct, label: A }
      - { id: acct, label: B }
"#;
        let err = VocabularyCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEntry { ref id, .. } if id == "acct"));
    }

    #[test]
    fn test_duplicate_vocabulary_rejected() {
        let json = r#"{"vocabularies": [{"name": "A"}, {"name": "A"}]}"#;
        let err = VocabularyCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateVocabulary(ref n) if n == "A"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("vocabularies.yml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(CATALOG_YAML.as_bytes())
            .unwrap();
        assert_eq!(VocabularyCatalog::load(&yaml_path).unwrap().vocabularies.len(), 2);

        let json_path = dir.path().join("vocabularies.json");
        std::fs::write(
            &json_path,
            r#"{"vocabularies": [{"name": "Colors", "entries": [{"id": "r", "label": "Red"}]}]}"#,
        )
        .unwrap();
        let catalog = VocabularyCatalog::load(&json_path).unwrap();
        assert_eq!(catalog.vocabularies[0].entry("r").unwrap().label, "Red");

        let txt_path = dir.path().join("vocabularies.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            VocabularyCatalog::load(&txt_path),
            Err(CatalogError::UnsupportedFormat(_))
        ));
    }
}
