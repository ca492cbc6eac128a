//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `read_element_tree`: reads one root element into an owned [`Element`]
//! - `namespace_uri`: turns a quick-xml resolution into an owned URI

use std::io::BufRead;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::xml::errors::BindError;
use crate::xml::node::{Element, QName};

/// Read the first element of a document, and everything inside it, into an
/// owned tree.
///
/// Prefixes are resolved against the declarations in scope; `xmlns`
/// attributes are consumed and not kept. Anything after the root element's
/// end tag is not read.
pub fn read_element_tree<R: BufRead>(source: R) -> Result<Element, BindError> {
    let mut reader = NsReader::from_reader(source);
    reader.trim_text(true);
    let mut buf = Vec::new();
    // Open elements, innermost last.
    let mut stack: Vec<Element> = Vec::new();

    loop {
        buf.clear();
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let ns = namespace_uri(ns)?;

        match event {
            Event::Start(e) => {
                let element = start_element(&reader, ns, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = start_element(&reader, ns, &e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(e) => {
                let element = stack.pop().ok_or_else(|| {
                    BindError::Malformed(format!(
                        "end tag </{}> without a start tag",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&reader.decoder().decode(&e)?);
                }
            }
            Event::Eof => return Err(BindError::UnexpectedEof),
            // Decl, Comment, PI, DocType
            _ => {}
        }
    }
}

/// Convert a resolution result into an owned namespace URI.
///
/// Unprefixed names with no default namespace in scope resolve to `None`.
pub fn namespace_uri(result: ResolveResult<'_>) -> Result<Option<String>, BindError> {
    match result {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(BindError::UnknownPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

/// Build an element (without children) from a start or empty tag.
fn start_element<R>(
    reader: &NsReader<R>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, BindError> {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = Element::new(QName {
        namespace,
        local,
    });

    for attr_result in start.attributes() {
        let attr = attr_result?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let name = QName {
            namespace: namespace_uri(ns)?,
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
        };
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((name, value));
    }

    Ok(element)
}
