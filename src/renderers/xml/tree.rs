//! Append-only XML element tree
//!
//! The export walker builds the whole document as a tree before anything is
//! written, so a property writer can add siblings next to the element it just
//! produced. Nodes are only ever appended.

/// Qualified element name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
    /// Namespace URI the prefix is bound to, if known
    pub uri: Option<String>,
}

impl QName {
    /// Unqualified name
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            uri: None,
        }
    }

    /// Name in a namespace; an empty prefix yields an unprefixed name
    pub fn get(local: impl Into<String>, prefix: &str, uri: &str) -> Self {
        Self {
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            local: local.into(),
            uri: (!uri.is_empty()).then(|| uri.to_string()),
        }
    }

    /// `prefix:local`, or just `local`
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, escaped on output
    Text(String),
    /// Character data written verbatim inside a CDATA section
    CData(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct XmlElement {
    pub name: QName,
    pub attributes: Vec<(String, String)>,
    /// Namespace declarations written on this element: (prefix, uri)
    pub namespaces: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a child element and return it for further building
    pub fn add_element(&mut self, name: QName) -> &mut XmlElement {
        self.children.push(XmlNode::Element(XmlElement::new(name)));
        match self.children.last_mut() {
            Some(XmlNode::Element(element)) => element,
            _ => unreachable!("an element was just pushed"),
        }
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn add_cdata(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(XmlNode::CData(text.into()));
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Declare `xmlns:prefix="uri"`, or `xmlns="uri"` for an empty prefix
    pub fn declare_namespace(&mut self, prefix: &str, uri: &str) -> &mut Self {
        self.namespaces.push((prefix.to_string(), uri.to_string()));
        self
    }

    /// Child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element with this local name
    pub fn element(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name.local == local)
    }

    /// Concatenated character data of the direct children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}
