#![cfg(test)]

//! A small record pair used to exercise the engine independently of the
//! XMILE view records.

use crate::descriptor::{FieldDescriptor, RecordDescriptor, XmlRecord};
use crate::value::{Numeric, ValueType};
use crate::xml::engine::{BoundFields, FieldWriter};
use crate::xml::errors::{BindError, SerializeError};
use crate::xml::node::Element;

pub const SAMPLE_NS: &str = "urn:test:sample";
pub const ITEM_NS: &str = "urn:test:item";

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub size: Option<Numeric>,
    pub flag: Option<bool>,
    pub doc: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: String,
}

impl XmlRecord for Sample {
    const META: RecordDescriptor = RecordDescriptor::new("sample", SAMPLE_NS);
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::attribute("name", ValueType::Text).required(),
        FieldDescriptor::attribute("size", ValueType::Numeric),
        FieldDescriptor::attribute("flag", ValueType::Boolean),
        FieldDescriptor::element("doc", ValueType::Text),
        FieldDescriptor::element("item", ValueType::Record)
            .in_namespace(ITEM_NS)
            .list(),
    ];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let name = fields.text("name")?;
        Ok(Self {
            name: fields.require("name", name)?,
            size: fields.numeric("size")?,
            flag: fields.bool("flag")?,
            doc: fields.text("doc")?,
            items: fields.records("item")?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.text("name", Some(self.name.as_str()))?
            .numeric("size", self.size)?
            .bool("flag", self.flag)?
            .text("doc", self.doc.as_deref())?
            .records("item", &self.items)?;
        Ok(())
    }
}

impl XmlRecord for Item {
    const META: RecordDescriptor = RecordDescriptor::new("item", ITEM_NS);
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::attribute("key", ValueType::Text).required()];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let key = fields.text("key")?;
        Ok(Self {
            key: fields.require("key", key)?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.text("key", Some(self.key.as_str()))?;
        Ok(())
    }
}

/// Parse a `sample` element whose children are unqualified.
pub fn sample_element(attrs: &str, body: &str) -> Element {
    let xml = format!(
        r#"<s:sample xmlns:s="{}" {}>{}</s:sample>"#,
        SAMPLE_NS, attrs, body
    );
    Element::parse_str(&xml).expect("Failed to parse sample element")
}
