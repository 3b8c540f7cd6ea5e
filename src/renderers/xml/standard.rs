//! Standard document export
//!
//! Walks every schema of a document and every property of each schema,
//! building the baseline export tree:
//!
//! ```xml
//! <document repository="default" id="...">
//!   <system><type>File</type><path>...</path>...</system>
//!   <schema name="dublincore" xmlns:dc="...">
//!     <dc:title>...</dc:title>
//!   </schema>
//! </document>
//! ```
//!
//! Each property is handed to a [`PropertyWriter`]. The default writer
//! produces the baseline output; other writers can wrap it to add elements.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::errors::{ExportError, Result};
use super::tree::{QName, XmlElement};
use super::writer::write_document;
use super::ExportOptions;
use crate::models::{BlobValue, Document, Field, FieldType, Namespace, Value};

/// Per-property hook called by the walker
///
/// Called once per (schema, field, value). Complex values dispatch their
/// sub-fields back through the same writer, so an implementation sees nested
/// fields too.
pub trait PropertyWriter {
    fn write_property(
        &mut self,
        parent: &mut XmlElement,
        namespace: &Namespace,
        field: &Field,
        value: Option<&Value>,
        inline_blobs: bool,
    ) -> Result<()> {
        write_standard_property(self, parent, namespace, field, value, inline_blobs)
    }
}

/// Writer producing the baseline export
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardProperties;

impl PropertyWriter for StandardProperties {}

/// Append the field's own element under `parent`
pub fn write_standard_property<W: PropertyWriter + ?Sized>(
    writer: &mut W,
    parent: &mut XmlElement,
    namespace: &Namespace,
    field: &Field,
    value: Option<&Value>,
    inline_blobs: bool,
) -> Result<()> {
    let element = parent.add_element(QName::get(
        field.name.as_str(),
        &namespace.prefix,
        &namespace.uri,
    ));

    match value {
        Some(value) => write_content(
            writer,
            element,
            namespace,
            field,
            &field.field_type,
            value,
            inline_blobs,
        ),
        None => Ok(()),
    }
}

fn write_content<W: PropertyWriter + ?Sized>(
    writer: &mut W,
    element: &mut XmlElement,
    namespace: &Namespace,
    field: &Field,
    field_type: &FieldType,
    value: &Value,
    inline_blobs: bool,
) -> Result<()> {
    match (field_type, value) {
        (FieldType::Simple(_), value) => {
            let text = value
                .to_text()
                .ok_or_else(|| invalid_value(field, "expected a scalar value"))?;
            if !text.is_empty() {
                element.add_text(text);
            }
            Ok(())
        }
        (FieldType::List(item_type), Value::List(items)) => {
            for item in items {
                let item_element = element.add_element(QName::local("item"));
                write_content(
                    writer,
                    item_element,
                    namespace,
                    field,
                    item_type,
                    item,
                    inline_blobs,
                )?;
            }
            Ok(())
        }
        (FieldType::Complex(sub_fields), Value::Complex(values)) => {
            for sub_field in sub_fields {
                writer.write_property(
                    element,
                    namespace,
                    sub_field,
                    values.get(&sub_field.name),
                    inline_blobs,
                )?;
            }
            Ok(())
        }
        (FieldType::Blob, Value::Blob(blob)) => {
            write_blob(element, blob, inline_blobs);
            Ok(())
        }
        (expected, _) => Err(invalid_value(
            field,
            &format!("value does not match declared type {:?}", expected),
        )),
    }
}

fn write_blob(element: &mut XmlElement, blob: &BlobValue, inline_blobs: bool) {
    add_optional(element, "encoding", blob.encoding.as_deref());
    add_optional(element, "mime-type", blob.mime_type.as_deref());
    add_optional(element, "filename", blob.filename.as_deref());
    add_optional(element, "digest", blob.digest.as_deref());
    if let Some(length) = blob.length {
        element.add_element(QName::local("length")).add_text(length.to_string());
    }

    // Without inlining, <data> only references the blob by digest
    let data = match (&blob.data, inline_blobs) {
        (Some(bytes), true) => Some(STANDARD.encode(bytes)),
        _ => blob.digest.clone(),
    };
    add_optional(element, "data", data.as_deref());
}

fn add_optional(parent: &mut XmlElement, name: &str, text: Option<&str>) {
    let child = parent.add_element(QName::local(name));
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        child.add_text(text);
    }
}

fn invalid_value(field: &Field, reason: &str) -> ExportError {
    ExportError::InvalidValue {
        field: field.name.clone(),
        reason: reason.to_string(),
    }
}

/// Result of walking a document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    root: XmlElement,
    options: ExportOptions,
}

impl ExportedDocument {
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Serialized XML text
    pub fn as_xml(&self) -> Result<String> {
        write_document(&self.root, &self.options)
    }
}

/// Walk `document`, sending every property through `writer`
pub fn export_document<W: PropertyWriter + ?Sized>(
    document: &Document,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<ExportedDocument> {
    let mut root = XmlElement::new(QName::local("document"));
    root.set_attribute("repository", document.repository.as_str());
    root.set_attribute("id", document.id.as_str());

    write_system(&mut root, document);

    for schema in &document.schemas {
        let schema_element = root.add_element(QName::local("schema"));
        schema_element.set_attribute("name", schema.name.as_str());
        if !schema.namespace.uri.is_empty() {
            schema_element.declare_namespace(&schema.namespace.prefix, &schema.namespace.uri);
        }

        for property in &schema.properties {
            writer.write_property(
                schema_element,
                &schema.namespace,
                &property.field,
                property.value.as_ref(),
                options.inline_blobs,
            )?;
        }
    }

    Ok(ExportedDocument {
        root,
        options: options.clone(),
    })
}

fn write_system(root: &mut XmlElement, document: &Document) {
    let system = root.add_element(QName::local("system"));
    system
        .add_element(QName::local("type"))
        .add_text(document.doc_type.as_str());
    system
        .add_element(QName::local("path"))
        .add_text(document.path.as_str());
    if let Some(state) = &document.lifecycle_state {
        system
            .add_element(QName::local("lifecycle-state"))
            .add_text(state.as_str());
    }
    if let Some(policy) = &document.lifecycle_policy {
        system
            .add_element(QName::local("lifecycle-policy"))
            .add_text(policy.as_str());
    }
    for facet in &document.facets {
        system
            .add_element(QName::local("facet"))
            .add_text(facet.as_str());
    }
}

/// Baseline export of `document` as XML text
pub fn export_standard_xml(document: &Document, options: &ExportOptions) -> Result<String> {
    export_document(document, &mut StandardProperties, options)?.as_xml()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Schema, SimpleType};
    use std::collections::BTreeMap;

    fn dublincore() -> Namespace {
        Namespace::new("dc", "http://www.nuxeo.org/ecm/schemas/dublincore/")
    }

    #[test]
    fn test_system_section() {
        let mut doc = Document::new("Report");
        doc.id = "1234".to_string();
        doc.doc_type = "File".to_string();
        doc.path = "/default-domain/workspaces/report".to_string();
        doc.lifecycle_state = Some("project".to_string());
        doc.facets = vec!["Downloadable".to_string(), "Versionable".to_string()];

        let exported = export_document(&doc, &mut StandardProperties, &ExportOptions::default())
            .unwrap();
        let root = exported.root();
        assert_eq!(
            root.attributes,
            vec![
                ("repository".to_string(), "default".to_string()),
                ("id".to_string(), "1234".to_string())
            ]
        );

        let system = root.element("system").unwrap();
        assert_eq!(system.element("type").unwrap().text(), "File");
        assert_eq!(system.element("lifecycle-state").unwrap().text(), "project");
        assert!(system.element("lifecycle-policy").is_none());
        assert_eq!(system.elements().filter(|e| e.name.local == "facet").count(), 2);
    }

    #[test]
    fn test_simple_list_and_null_properties() {
        let string_list = FieldType::List(Box::new(FieldType::Simple(SimpleType::String)));
        let doc = Document::new("Report").with_schema(
            Schema::new("dublincore", dublincore())
                .with_property(Field::string("title"), Some(Value::from("Q3 <draft>")))
                .with_property(
                    Field::new("subjects", string_list),
                    Some(Value::List(vec![Value::from("finance"), Value::from("audit")])),
                )
                .with_property(Field::string("description"), None),
        );

        let xml = export_standard_xml(&doc, &ExportOptions::default()).unwrap();
        assert!(xml.contains(
            "<schema xmlns:dc=\"http://www.nuxeo.org/ecm/schemas/dublincore/\" name=\"dublincore\">"
        ));
        assert!(xml.contains("<dc:title>Q3 &lt;draft&gt;</dc:title>"));
        assert!(xml.contains("<dc:subjects><item>finance</item><item>audit</item></dc:subjects>"));
        assert!(xml.contains("<dc:description/>"));
    }

    #[test]
    fn test_complex_property_writes_sub_fields_in_declared_order() {
        let address = FieldType::Complex(vec![
            Field::string("street"),
            Field::string("city"),
            Field::new("zip", FieldType::Simple(SimpleType::Integer)),
        ]);
        let mut values = BTreeMap::new();
        values.insert("city".to_string(), Value::from("Paris"));
        values.insert("zip".to_string(), Value::Integer(75001));
        values.insert("street".to_string(), Value::from("Rue de Rivoli"));

        let doc = Document::new("Report").with_schema(
            Schema::new("contact", Namespace::new("ct", "http://example.com/contact"))
                .with_property(Field::new("address", address), Some(Value::Complex(values))),
        );

        let xml = export_standard_xml(&doc, &ExportOptions::default()).unwrap();
        assert!(xml.contains(
            "<ct:address><ct:street>Rue de Rivoli</ct:street><ct:city>Paris</ct:city><ct:zip>75001</ct:zip></ct:address>"
        ));
    }

    #[test]
    fn test_blob_inlining() {
        let blob = BlobValue {
            filename: Some("report.txt".to_string()),
            mime_type: Some("text/plain".to_string()),
            encoding: None,
            digest: Some("d41d8cd9".to_string()),
            length: Some(5),
            data: Some(b"hello".to_vec()),
        };
        let doc = Document::new("Report").with_schema(
            Schema::new("file", Namespace::new("file", "http://example.com/file"))
                .with_property(Field::new("content", FieldType::Blob), Some(Value::Blob(blob))),
        );

        let by_reference = export_standard_xml(&doc, &ExportOptions::default()).unwrap();
        assert!(by_reference.contains(
            "<file:content><encoding/><mime-type>text/plain</mime-type><filename>report.txt</filename>\
             <digest>d41d8cd9</digest><length>5</length><data>d41d8cd9</data></file:content>"
        ));

        let options = ExportOptions {
            inline_blobs: true,
            ..ExportOptions::default()
        };
        let inlined = export_standard_xml(&doc, &options).unwrap();
        assert!(inlined.contains("<data>aGVsbG8=</data>"));
    }

    #[test]
    fn test_unprefixed_schema_uses_default_namespace() {
        let doc = Document::new("Report").with_schema(
            Schema::new("common", Namespace::new("", "http://example.com/common"))
                .with_property(Field::string("icon"), Some(Value::from("/icons/file.gif"))),
        );
        let xml = export_standard_xml(&doc, &ExportOptions::default()).unwrap();
        assert!(xml.contains("<schema xmlns=\"http://example.com/common\" name=\"common\"><icon>/icons/file.gif</icon></schema>"));
    }

    #[test]
    fn test_type_mismatch_is_fatal() {
        let doc = Document::new("Report").with_schema(
            Schema::new("dublincore", dublincore()).with_property(
                Field::string("title"),
                Some(Value::List(vec![Value::from("oops")])),
            ),
        );
        let err = export_standard_xml(&doc, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidValue { ref field, .. } if field == "title"));
    }
}
