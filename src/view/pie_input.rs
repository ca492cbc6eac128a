//! The isee `<pie_input>` view object: an interactive pie chart whose slices
//! are driven by one or more plots.
//!
//! ```xml
//! <isee:pie_input xmlns="http://docs.oasis-open.org/xmile/ns/XMILE/v1.0"
//!                 xmlns:isee="http://iseesystems.com/XMILE"
//!                 uid="12" x="100" y="80" width="240" height="200"
//!                 legend_position="right" isee:label_pie_slices="true">
//!     <plot index="0"><entity name="Share A"/></plot>
//!     <plot index="1"><entity name="Share B"/></plot>
//! </isee:pie_input>
//! ```
//!
//! Vendor-only settings (`round_values`, `transparent`, `label_pie_slices`)
//! are attributes in the isee namespace; everything else is unqualified.

use std::io::BufRead;

use crate::Uid;
use crate::descriptor::{FieldDescriptor, RecordDescriptor, XmlRecord};
use crate::namespace::{ISEE_NAMESPACE, XMILE_NAMESPACE};
use crate::types::WithWarnings;
use crate::value::{Numeric, ValueType};
use crate::view::plot::Plot;
use crate::xml::engine::{BindOptions, BoundFields, FieldWriter};
use crate::xml::errors::{BindError, SerializeError};

/// A bound `pie_input` element.
///
/// Every optional attribute is `None` when absent, never a placeholder such
/// as `0` or `""`. `legend_position` is required.
///
/// Writing then binding gives back an equal record, except that a NaN in a
/// float or numeric field comes back as NaN and so never compares equal.
#[derive(Debug, Clone, PartialEq)]
pub struct PieInput {
    pub round_values: Option<bool>,
    pub width: Option<f64>,
    pub y: Option<f64>,
    pub x: Option<Numeric>,
    pub title: Option<String>,
    pub uid: Option<Uid>,
    pub transparent: Option<bool>,
    pub height: Option<Numeric>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub legend_position: String,
    pub z_index: Option<i32>,
    pub label_pie_slices: Option<bool>,
    /// In document order.
    pub plot: Vec<Plot>,
}

impl PieInput {
    /// A pie input with only the required legend position set.
    pub fn new(legend_position: impl Into<String>) -> Self {
        Self {
            round_values: None,
            width: None,
            y: None,
            x: None,
            title: None,
            uid: None,
            transparent: None,
            height: None,
            color: None,
            background: None,
            font_family: None,
            font_size: None,
            legend_position: legend_position.into(),
            z_index: None,
            label_pie_slices: None,
            plot: Vec::new(),
        }
    }

    /// Parse a document whose root is a `pie_input` element.
    pub fn from_xml_str(xml: &str) -> Result<Self, BindError> {
        crate::xml::from_str(xml)
    }

    pub fn from_xml_str_with(xml: &str, options: &BindOptions) -> Result<Self, BindError> {
        crate::xml::from_str_with(xml, options)
    }

    pub fn from_reader<R: BufRead>(reader: R, options: &BindOptions) -> Result<Self, BindError> {
        crate::xml::from_reader(reader, options)
    }

    /// Parse, reporting ignored unknown content as warnings.
    pub fn from_xml_str_with_warnings(xml: &str) -> Result<WithWarnings<Self, String>, BindError> {
        crate::xml::from_str_with_warnings(xml, &BindOptions::default())
    }

    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        crate::xml::to_string(self)
    }
}

impl XmlRecord for PieInput {
    const META: RecordDescriptor = RecordDescriptor::new("pie_input", ISEE_NAMESPACE);
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::attribute("round_values", ValueType::Boolean).in_namespace(ISEE_NAMESPACE),
        FieldDescriptor::attribute("width", ValueType::Float),
        FieldDescriptor::attribute("y", ValueType::Float),
        FieldDescriptor::attribute("x", ValueType::Numeric),
        FieldDescriptor::attribute("title", ValueType::Text),
        FieldDescriptor::attribute("uid", ValueType::Integer),
        FieldDescriptor::attribute("transparent", ValueType::Boolean).in_namespace(ISEE_NAMESPACE),
        FieldDescriptor::attribute("height", ValueType::Numeric),
        FieldDescriptor::attribute("color", ValueType::Text),
        FieldDescriptor::attribute("background", ValueType::Text),
        FieldDescriptor::attribute("font_family", ValueType::Text),
        FieldDescriptor::attribute("font_size", ValueType::Text),
        FieldDescriptor::attribute("legend_position", ValueType::Text).required(),
        FieldDescriptor::attribute("z_index", ValueType::Integer),
        FieldDescriptor::attribute("label_pie_slices", ValueType::Boolean)
            .in_namespace(ISEE_NAMESPACE),
        FieldDescriptor::element("plot", ValueType::Record)
            .in_namespace(XMILE_NAMESPACE)
            .list(),
    ];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let legend_position = fields.text("legend_position")?;

        Ok(Self {
            round_values: fields.bool("round_values")?,
            width: fields.float("width")?,
            y: fields.float("y")?,
            x: fields.numeric("x")?,
            title: fields.text("title")?,
            uid: fields.integer_as("uid")?.map(Uid::new),
            transparent: fields.bool("transparent")?,
            height: fields.numeric("height")?,
            color: fields.text("color")?,
            background: fields.text("background")?,
            font_family: fields.text("font_family")?,
            font_size: fields.text("font_size")?,
            legend_position: fields.require("legend_position", legend_position)?,
            z_index: fields.integer_as("z_index")?,
            label_pie_slices: fields.bool("label_pie_slices")?,
            plot: fields.records("plot")?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.bool("round_values", self.round_values)?
            .float("width", self.width)?
            .float("y", self.y)?
            .numeric("x", self.x)?
            .text("title", self.title.as_deref())?
            .integer("uid", self.uid.map(|uid| i64::from(uid.value)))?
            .bool("transparent", self.transparent)?
            .numeric("height", self.height)?
            .text("color", self.color.as_deref())?
            .text("background", self.background.as_deref())?
            .text("font_family", self.font_family.as_deref())?
            .text("font_size", self.font_size.as_deref())?
            .text("legend_position", Some(self.legend_position.as_str()))?
            .integer("z_index", self.z_index.map(i64::from))?
            .bool("label_pie_slices", self.label_pie_slices)?
            .records("plot", &self.plot)?;
        Ok(())
    }
}
