//! Serialize an element tree with quick-xml

use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::errors::{xml_error, Result};
use super::tree::{XmlElement, XmlNode};
use super::ExportOptions;

/// Write `root` as a complete UTF-8 XML document
pub fn write_document(root: &XmlElement, options: &ExportOptions) -> Result<String> {
    let mut writer = match options.indent {
        Some(size) if size > 0 => Writer::new_with_indent(Cursor::new(Vec::new()), b' ', size),
        _ => Writer::new(Cursor::new(Vec::new())),
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(xml_error)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let name = element.name.qualified();
    let mut start = BytesStart::new(name.as_str());

    for (prefix, uri) in &element.namespaces {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?,
            XmlNode::CData(text) => write_cdata(writer, text)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(xml_error)
}

/// `]]>` cannot appear inside a CDATA section, so it is split across two
fn write_cdata<W: std::io::Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        writer
            .write_event(Event::CData(BytesCData::new(&rest[..pos + 2])))
            .map_err(xml_error)?;
        rest = &rest[pos + 2..];
    }
    writer
        .write_event(Event::CData(BytesCData::new(rest)))
        .map_err(xml_error)
}
