//! Owned XML element tree.
//!
//! Chart writers assemble documents as explicit trees (qualified name,
//! attribute list, ordered children) and the series rewriter mutates trees
//! parsed from existing chart parts. Escaping is applied structurally at
//! serialization time, so builders and rewriters always work with raw text.
//!
//! Element and attribute names are stored as they appear on the wire,
//! prefix included (`c:ser`, `xmlns:c`); the chart vocabulary is a fixed
//! compatibility contract, so no namespace resolution is performed.

use crate::error::{ChartError, Result};
use crate::xml::escape::{escape_xml, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One node of an element's content.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// A child element
    Element(XmlElement),
    /// A text run
    Text(String),
}

/// An XML element: qualified name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified element name, e.g. `c:ser`
    pub name: String,
    /// Attributes in document order
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes or children.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute (builder style).
    #[inline]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child element (builder style).
    #[inline]
    pub fn child(mut self, element: XmlElement) -> Self {
        self.children.push(XmlNode::Element(element));
        self
    }

    /// Append a text run (builder style).
    #[inline]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Value of the named attribute, if present.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set the named attribute, replacing an existing value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Append a child element.
    #[inline]
    pub fn push_child(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Insert a child element at `index` (counted over all nodes).
    #[inline]
    pub fn insert_child(&mut self, index: usize, element: XmlElement) {
        self.children.insert(index, XmlNode::Element(element));
    }

    /// Child elements in document order, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Mutable child elements in document order, skipping text runs.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.name == name)
    }

    /// First child element with the given name, mutable.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|el| el.name == name)
    }

    /// Remove every child element with the given name.
    pub fn remove_children(&mut self, name: &str) {
        self.children.retain(|node| match node {
            XmlNode::Element(el) => el.name != name,
            XmlNode::Text(_) => true,
        });
    }

    /// Concatenated direct text content of this element.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialize this element (compact, no insignificant whitespace).
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.serialize_into(&mut out);
        out
    }

    fn serialize_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for node in &self.children {
            match node {
                XmlNode::Element(el) => el.serialize_into(out),
                XmlNode::Text(text) => out.push_str(&escape_xml(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Parse a single-rooted XML document into an element tree.
    ///
    /// Whitespace-only text runs are dropped; comments, processing
    /// instructions, and the XML declaration are ignored.
    pub fn parse_str(xml: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(e)?);
                },
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ChartError::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::Text(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(e.as_ref());
                        parent.children.push(XmlNode::Text(unescape_xml(&raw)));
                    }
                },
                Ok(Event::CData(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(e.as_ref());
                        parent.children.push(XmlNode::Text(raw.into_owned()));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ChartError::Xml(e.to_string())),
                _ => {},
            }
        }

        if !stack.is_empty() {
            return Err(ChartError::Xml("unclosed element".to_string()));
        }
        root.ok_or_else(|| ChartError::Xml("no root element".to_string()))
    }
}

fn element_from_start(e: &BytesStart) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ChartError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = unescape_xml(&String::from_utf8_lossy(&attr.value));
        element.attrs.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(ChartError::Xml("multiple root elements".to_string()))
    }
}

/// Serialize a root element as a complete XML document, declaration
/// included, as bytes suitable for writing directly to a package part.
pub fn serialize_document(root: &XmlElement) -> Vec<u8> {
    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    root.serialize_into(&mut out);
    out.into_bytes()
}
