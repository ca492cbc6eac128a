//! The `<plot>` element of a graph-like view object.
//!
//! ```xml
//! <plot index="0" pen_width="1" pen_style="solid" color="#4E79A7" precision="2">
//!     <entity name="Population"/>
//!     <scale min="0" max="100"/>
//! </plot>
//! ```

use std::fmt;
use std::str::FromStr;

use crate::descriptor::{FieldDescriptor, RecordDescriptor, XmlRecord};
use crate::namespace::XMILE_NAMESPACE;
use crate::value::ValueType;
use crate::xml::engine::{BoundFields, FieldWriter};
use crate::xml::errors::{BindError, SerializeError};

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plot {
    pub index: Option<u32>,
    pub pen_width: Option<f64>,
    pub pen_style: Option<PenStyle>,
    pub show_y_axis: Option<bool>,
    pub title: Option<String>,
    pub right_axis: Option<bool>,
    /// Decimal places shown for values.
    pub precision: Option<u32>,
    pub color: Option<String>,
    /// The model entities plotted by this series.
    pub entity: Vec<EntityRef>,
    pub scale: Option<PlotScale>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenStyle {
    Solid,
    Dotted,
    Dashed,
    DotDashed,
}

impl PenStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PenStyle::Solid => "solid",
            PenStyle::Dotted => "dotted",
            PenStyle::Dashed => "dashed",
            PenStyle::DotDashed => "dot_dashed",
        }
    }
}

impl fmt::Display for PenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PenStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(PenStyle::Solid),
            "dotted" => Ok(PenStyle::Dotted),
            "dashed" => Ok(PenStyle::Dashed),
            "dot_dashed" => Ok(PenStyle::DotDashed),
            _ => Err(format!(
                "expected solid, dotted, dashed or dot_dashed (got '{}')",
                s
            )),
        }
    }
}

/// A reference to a model entity by name.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef {
    pub name: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Fixed axis range for a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    pub min: f64,
    pub max: f64,
}

impl XmlRecord for Plot {
    const META: RecordDescriptor = RecordDescriptor::new("plot", XMILE_NAMESPACE);
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::attribute("index", ValueType::Integer),
        FieldDescriptor::attribute("pen_width", ValueType::Float),
        FieldDescriptor::attribute("pen_style", ValueType::Text),
        FieldDescriptor::attribute("show_y_axis", ValueType::Boolean),
        FieldDescriptor::attribute("title", ValueType::Text),
        FieldDescriptor::attribute("right_axis", ValueType::Boolean),
        FieldDescriptor::attribute("precision", ValueType::Integer),
        FieldDescriptor::attribute("color", ValueType::Text),
        FieldDescriptor::element("entity", ValueType::Record).list(),
        FieldDescriptor::element("scale", ValueType::Record),
    ];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let pen_style = match fields.text("pen_style")? {
            Some(text) => Some(
                text.parse::<PenStyle>()
                    .map_err(|reason| fields.invalid("pen_style", &text, reason))?,
            ),
            None => None,
        };

        Ok(Self {
            index: fields.integer_as("index")?,
            pen_width: fields.float("pen_width")?,
            pen_style,
            show_y_axis: fields.bool("show_y_axis")?,
            title: fields.text("title")?,
            right_axis: fields.bool("right_axis")?,
            precision: fields.integer_as("precision")?,
            color: fields.text("color")?,
            entity: fields.records("entity")?,
            scale: fields.record_field("scale")?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.integer("index", self.index.map(i64::from))?
            .float("pen_width", self.pen_width)?
            .text("pen_style", self.pen_style.as_ref().map(PenStyle::as_str))?
            .bool("show_y_axis", self.show_y_axis)?
            .text("title", self.title.as_deref())?
            .bool("right_axis", self.right_axis)?
            .integer("precision", self.precision.map(i64::from))?
            .text("color", self.color.as_deref())?
            .records("entity", &self.entity)?
            .record_field("scale", self.scale.as_ref())?;
        Ok(())
    }
}

impl XmlRecord for EntityRef {
    const META: RecordDescriptor = RecordDescriptor::new("entity", XMILE_NAMESPACE);
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::attribute("name", ValueType::Text).required()];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let name = fields.text("name")?;
        Ok(Self {
            name: fields.require("name", name)?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.text("name", Some(self.name.as_str()))?;
        Ok(())
    }
}

impl XmlRecord for PlotScale {
    const META: RecordDescriptor = RecordDescriptor::new("scale", XMILE_NAMESPACE);
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::attribute("min", ValueType::Float).required(),
        FieldDescriptor::attribute("max", ValueType::Float).required(),
    ];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError> {
        let min = fields.float("min")?;
        let max = fields.float("max")?;
        Ok(Self {
            min: fields.require("min", min)?,
            max: fields.require("max", max)?,
        })
    }

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError> {
        out.float("min", Some(self.min))?.float("max", Some(self.max))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::check_table;
    use crate::xml::{self, BindError, Violation};

    #[test]
    fn test_tables_are_well_formed() {
        assert!(check_table(&Plot::META, Plot::FIELDS).is_empty());
        assert!(check_table(&EntityRef::META, EntityRef::FIELDS).is_empty());
        assert!(check_table(&PlotScale::META, PlotScale::FIELDS).is_empty());
    }

    #[test]
    fn test_plot_parsing() {
        let xml = r#"<plot index="1" pen_width="1.5" pen_style="dot_dashed" show_y_axis="true" title="Births" precision="2" color="blue">
            <entity name="births"/>
            <scale min="0" max="50"/>
        </plot>"#;

        let plot: Plot = xml::from_str(xml).unwrap();
        assert_eq!(plot.index, Some(1));
        assert_eq!(plot.pen_width, Some(1.5));
        assert_eq!(plot.pen_style, Some(PenStyle::DotDashed));
        assert_eq!(plot.show_y_axis, Some(true));
        assert_eq!(plot.right_axis, None);
        assert_eq!(plot.precision, Some(2));
        assert_eq!(plot.entity, vec![EntityRef::new("births")]);
        assert_eq!(plot.scale, Some(PlotScale { min: 0.0, max: 50.0 }));
    }

    #[test]
    fn test_unknown_pen_style() {
        let err = xml::from_str::<Plot>(r#"<plot pen_style="wavy"/>"#).unwrap_err();
        match err {
            BindError::SchemaViolation {
                field, violation, ..
            } => {
                assert_eq!(field, "pen_style");
                assert!(matches!(violation, Violation::InvalidValue { ref value, .. } if value == "wavy"));
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_index_is_out_of_range() {
        let err = xml::from_str::<Plot>(r#"<plot index="-1"/>"#).unwrap_err();
        assert_eq!(err.field(), Some("index"));
    }

    #[test]
    fn test_scale_requires_both_bounds() {
        let err = xml::from_str::<Plot>(r#"<plot><scale min="0"/></plot>"#).unwrap_err();
        match err {
            BindError::SchemaViolation { element, field, .. } => {
                assert_eq!(element, "plot/scale");
                assert_eq!(field, "max");
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_unbind_skips_absent_values() {
        let plot = Plot {
            index: Some(0),
            ..Plot::default()
        };
        let element = crate::xml::engine::unbind(&plot).unwrap();
        assert_eq!(element.attributes.len(), 1);
        assert!(element.children.is_empty());
    }
}
