//! Serialization helpers for quick-xml.
//!
//! Provides:
//! - `AttrList`: attribute builder that owns formatted values
//! - `PrefixMap`: the prefix chosen for each namespace in a tree
//! - `XmlEmitter`: writes an [`Element`] tree through a quick-xml `Writer`

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::namespace::{Namespace, XMILE_NAMESPACE};
use crate::xml::errors::SerializeError;
use crate::xml::node::{Element, QName};

/// A list of attributes with owned values.
///
/// This avoids the lifetime issues with quick-xml's `ElementWriter::with_attribute`
/// by owning all formatted string values until the element is written.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    pub fn add(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.attrs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Add an optional attribute (only added if Some).
    pub fn add_opt(&mut self, key: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(v) = value {
            self.add(key, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Apply all attributes to a BytesStart element.
    pub fn apply_to(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Namespace prefixes for one written document.
///
/// The XMILE namespace is the default namespace for elements whenever the
/// root element is namespaced. Every other namespace, and any namespace used
/// on an attribute, gets a prefix: its conventional one (`isee`, `xmile`) or
/// a generated `ns1`, `ns2`, ... in first-use order.
#[derive(Debug, Default)]
pub struct PrefixMap {
    default: Option<String>,
    /// (uri, prefix), in declaration order.
    prefixed: Vec<(String, String)>,
}

impl PrefixMap {
    pub fn for_tree(root: &Element) -> Self {
        let mut map = Self::default();
        if root.name.namespace.is_some() && uses_element_namespace(root, XMILE_NAMESPACE) {
            map.default = Some(XMILE_NAMESPACE.to_string());
        }
        map.collect(root);
        map
    }

    fn collect(&mut self, element: &Element) {
        if let Some(uri) = element.name.namespace.as_deref() {
            if self.default.as_deref() != Some(uri) {
                self.ensure_prefix(uri);
            }
        }
        for (name, _) in &element.attributes {
            if let Some(uri) = name.namespace.as_deref() {
                self.ensure_prefix(uri);
            }
        }
        for child in &element.children {
            self.collect(child);
        }
    }

    fn ensure_prefix(&mut self, uri: &str) {
        if self.prefix_of(uri).is_some() {
            return;
        }
        let prefix = match Namespace::from_uri(uri).prefix() {
            Some(prefix) => prefix.to_string(),
            None => {
                let mut n = 1;
                while self.prefixed.iter().any(|(_, p)| *p == format!("ns{}", n)) {
                    n += 1;
                }
                format!("ns{}", n)
            }
        };
        self.prefixed.push((uri.to_string(), prefix));
    }

    pub fn prefix_of(&self, uri: &str) -> Option<&str> {
        self.prefixed
            .iter()
            .find(|(u, _)| u == uri)
            .map(|(_, p)| p.as_str())
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The tag to write for an element name.
    pub fn element_tag(&self, name: &QName) -> Result<String, SerializeError> {
        match name.namespace.as_deref() {
            None => Ok(name.local.clone()),
            Some(uri) if self.default.as_deref() == Some(uri) => Ok(name.local.clone()),
            Some(uri) => self.qualified(uri, &name.local),
        }
    }

    /// The key to write for an attribute name. Unqualified attributes stay
    /// unprefixed; attributes never use the default namespace.
    pub fn attribute_key(&self, name: &QName) -> Result<String, SerializeError> {
        match name.namespace.as_deref() {
            None => Ok(name.local.clone()),
            Some(uri) => self.qualified(uri, &name.local),
        }
    }

    fn qualified(&self, uri: &str, local: &str) -> Result<String, SerializeError> {
        self.prefix_of(uri)
            .map(|prefix| format!("{}:{}", prefix, local))
            .ok_or_else(|| SerializeError::UnboundNamespace(uri.to_string()))
    }

    /// Add the `xmlns` declarations for the root element.
    pub fn declare(&self, attrs: &mut AttrList) {
        attrs.add_opt("xmlns", self.default.as_deref());
        for (uri, prefix) in &self.prefixed {
            attrs.add(&format!("xmlns:{}", prefix), uri);
        }
    }
}

fn uses_element_namespace(element: &Element, uri: &str) -> bool {
    element.name.namespace.as_deref() == Some(uri)
        || element
            .children
            .iter()
            .any(|child| uses_element_namespace(child, uri))
}

/// A helper for writing element trees with less boilerplate.
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// Write an XML declaration.
    pub fn xml_decl(&mut self) -> Result<(), SerializeError> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// Write an element and its subtree. The root carries the namespace
    /// declarations for the whole tree.
    pub fn element(
        &mut self,
        element: &Element,
        prefixes: &PrefixMap,
        is_root: bool,
    ) -> Result<(), SerializeError> {
        let tag = prefixes.element_tag(&element.name)?;

        let mut attrs = AttrList::new();
        if is_root {
            prefixes.declare(&mut attrs);
        } else if element.name.namespace.is_none() && prefixes.default_namespace().is_some() {
            // Step out of the inherited default namespace.
            attrs.add("xmlns", "");
        }
        for (name, value) in &element.attributes {
            attrs.add(&prefixes.attribute_key(name)?, value);
        }

        let mut start = BytesStart::new(tag.as_str());
        attrs.apply_to(&mut start);

        if element.children.is_empty() && element.text.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        if !element.text.is_empty() {
            self.writer
                .write_event(Event::Text(BytesText::new(&element.text)))?;
        }
        for child in &element.children {
            self.element(child, prefixes, false)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        Ok(())
    }
}

/// Write `root` as a complete document: declaration, namespace
/// declarations on the root, two-space indentation.
pub fn write_document(root: &Element) -> Result<String, SerializeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let prefixes = PrefixMap::for_tree(root);

    let mut emit = XmlEmitter::new(&mut writer);
    emit.xml_decl()?;
    emit.element(root, &prefixes, true)?;

    Ok(String::from_utf8(writer.into_inner())?)
}
