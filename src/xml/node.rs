//! Namespace-resolved, owned XML element trees.
//!
//! Parsing produces an [`Element`] for one root element and everything under
//! it. Prefixes are resolved to URIs on the way in and chosen again on the
//! way out, so the tree never carries `xmlns` declarations.

use std::fmt;
use std::io::BufRead;

use crate::xml::errors::{BindError, SerializeError};
use crate::xml::quick::de::read_element_tree;
use crate::xml::quick::ser::write_document;

/// A local name with its resolved namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// `None` for names outside any namespace.
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        }
    }

    /// A name outside any namespace.
    pub fn local(local: &str) -> Self {
        Self::new(None, local)
    }

    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{uri}local`, or just `local`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One XML element with its attributes, child elements and text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: QName,
    /// In document order.
    pub attributes: Vec<(QName, String)>,
    /// In document order.
    pub children: Vec<Element>,
    /// Concatenated text and CDATA content.
    pub text: String,
}

impl Default for QName {
    fn default() -> Self {
        Self::local("")
    }
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Parse the root element of an XML document held in a string.
    pub fn parse_str(xml: &str) -> Result<Self, BindError> {
        Self::parse_reader(xml.as_bytes())
    }

    /// Parse the root element of an XML document from a buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, BindError> {
        read_element_tree(reader)
    }

    /// Write this element as a standalone XML document.
    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        write_document(self)
    }

    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.is(namespace, local))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_display() {
        assert_eq!(QName::local("plot").to_string(), "plot");
        assert_eq!(
            QName::new(Some("urn:a"), "plot").to_string(),
            "{urn:a}plot"
        );
    }

    #[test]
    fn test_attribute_lookup_respects_namespace() {
        let mut element = Element::new(QName::local("pie_input"));
        element
            .attributes
            .push((QName::new(Some("urn:isee"), "transparent"), "true".to_string()));
        element
            .attributes
            .push((QName::local("width"), "10".to_string()));

        assert_eq!(element.attribute(Some("urn:isee"), "transparent"), Some("true"));
        assert_eq!(element.attribute(None, "transparent"), None);
        assert_eq!(element.attribute(None, "width"), Some("10"));
    }
}
