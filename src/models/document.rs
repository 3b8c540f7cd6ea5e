//! Document model consumed by the XML export
//!
//! A document is a set of schemas; each schema holds an ordered list of
//! properties (field descriptor plus optional value). The export never
//! mutates a document.

use serde::{Deserialize, Serialize};

use super::value::{Field, Value};

/// XML namespace of a schema
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Namespace {
    /// Element prefix, e.g. `dc`. May be empty.
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// A field of a schema together with its value on one document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Property {
    pub field: Field,
    /// `None` when the property is not set
    #[serde(default)]
    pub value: Option<Value>,
}

impl Property {
    pub fn new(field: Field, value: Option<Value>) -> Self {
        Self { field, value }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Schema {
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            properties: Vec::new(),
        }
    }

    /// Builder-style property append
    pub fn with_property(mut self, field: Field, value: Option<Value>) -> Self {
        self.properties.push(Property::new(field, value));
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Document type name, written as `<system><type>`
    #[serde(default, rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
    #[serde(default)]
    pub lifecycle_policy: Option<String>,
    #[serde(default)]
    pub facets: Vec<String>,
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

fn default_repository() -> String {
    "default".to_string()
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            repository: default_repository(),
            doc_type: String::new(),
            path: String::new(),
            title: title.into(),
            lifecycle_state: None,
            lifecycle_policy: None,
            facets: Vec::new(),
            schemas: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
