//! XML reading, binding and writing.
//!
//! - [`node`]: owned, namespace-resolved element trees
//! - [`engine`]: descriptor-driven binding between trees and records
//! - [`quick`]: the quick-xml reader and writer underneath
//!
//! The functions here cover the common case of one record per document.

use std::io::BufRead;

pub mod engine;
pub mod errors;
pub mod node;
pub mod quick;

pub use engine::{BindOptions, UnknownAttributePolicy, UnknownChildPolicy};
pub use errors::{BindError, SerializeError, Violation};
pub use node::{Element, QName};

use crate::descriptor::XmlRecord;
use crate::types::WithWarnings;

/// Parse a document and bind its root element as `T` with default options.
pub fn from_str<T: XmlRecord>(xml: &str) -> Result<T, BindError> {
    from_str_with(xml, &BindOptions::default())
}

pub fn from_str_with<T: XmlRecord>(xml: &str, options: &BindOptions) -> Result<T, BindError> {
    let root = Element::parse_str(xml)?;
    engine::bind(&root, options)
}

pub fn from_str_with_warnings<T: XmlRecord>(
    xml: &str,
    options: &BindOptions,
) -> Result<WithWarnings<T, String>, BindError> {
    let root = Element::parse_str(xml)?;
    engine::bind_with_warnings(&root, options)
}

pub fn from_reader<T: XmlRecord, R: BufRead>(
    reader: R,
    options: &BindOptions,
) -> Result<T, BindError> {
    let root = Element::parse_reader(reader)?;
    engine::bind(&root, options)
}

/// Write `record` as a standalone document.
pub fn to_string<T: XmlRecord>(record: &T) -> Result<String, SerializeError> {
    engine::unbind(record)?.to_xml_string()
}
