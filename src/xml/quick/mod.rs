//! Quick-xml helper utilities for reading and writing element trees.
//!
//! This module wraps quick-xml's low-level event APIs so the binding engine
//! only ever deals with owned, namespace-resolved [`Element`](crate::xml::Element)s.

pub mod de;
pub mod ser;

pub use de::{namespace_uri, read_element_tree};
pub use ser::{AttrList, PrefixMap, XmlEmitter, write_document};
