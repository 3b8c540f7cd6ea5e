//! Property values and their field type descriptors
//!
//! A field descriptor says what a property may hold; a [`Value`] is what it
//! actually holds on a given document. Only [`FieldType::Simple`] fields are
//! scalar; lists, complex structures and blobs are compound.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar type of a simple field
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimpleType {
    String,
    Integer,
    Double,
    Boolean,
    /// ISO-8601 date/time stored as text
    Date,
}

/// Type of a field as declared by its schema
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Simple(SimpleType),
    /// Ordered list of items of the inner type
    List(Box<FieldType>),
    /// Structure with its own named sub-fields, written in declaration order
    Complex(Vec<Field>),
    Blob,
}

impl FieldType {
    /// Whether this type is a scalar (non-compound) type
    pub fn is_simple(&self) -> bool {
        matches!(self, FieldType::Simple(_))
    }
}

/// A named, typed property descriptor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Field {
    /// Local name of the field (without the schema prefix)
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Shorthand for a `Simple(String)` field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Simple(SimpleType::String))
    }
}

/// Binary content attached to a blob property
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct BlobValue {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub length: Option<u64>,
    /// Raw content, only present when the blob was loaded with the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

/// Value stored in a document property
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Date(String),
    List(Vec<Value>),
    /// Sub-field name -> value. Absent keys are written as empty elements.
    Complex(BTreeMap<String, Value>),
    Blob(BlobValue),
}

impl Value {
    /// Text form of a scalar value; `None` for compound values
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) | Value::Date(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Double(d) => Some(d.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::List(_) | Value::Complex(_) | Value::Blob(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => match self {
                Value::List(items) => write!(f, "[{} items]", items.len()),
                Value::Complex(map) => write!(f, "{{{} fields}}", map.len()),
                _ => f.write_str("<blob>"),
            },
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
