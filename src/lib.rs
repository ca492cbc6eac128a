//! Declarative binding of XMILE elements to typed records.
//!
//! Each record type declares its XML shape once, as a static descriptor
//! table (see [`descriptor`]). The engine in [`xml::engine`] reads those
//! tables to bind parsed elements to records and to write records back.
//!
//! ```rust
//! use xmile_bind::view::PieInput;
//! use xmile_bind::Numeric;
//!
//! let xml = r#"<isee:pie_input xmlns="http://docs.oasis-open.org/xmile/ns/XMILE/v1.0"
//!     xmlns:isee="http://iseesystems.com/XMILE"
//!     x="10" height="10.5" legend_position="right" isee:transparent="true">
//!     <plot index="0"/>
//! </isee:pie_input>"#;
//!
//! let pie = PieInput::from_xml_str(xml).unwrap();
//! assert_eq!(pie.x, Some(Numeric::Integer(10)));
//! assert_eq!(pie.height, Some(Numeric::Float(10.5)));
//! assert_eq!(pie.transparent, Some(true));
//! assert_eq!(pie.plot.len(), 1);
//!
//! let out = pie.to_xml_string().unwrap();
//! assert!(out.contains("isee:transparent=\"true\""));
//! assert_eq!(PieInput::from_xml_str(&out).unwrap(), pie);
//! ```

pub mod core;
pub mod descriptor;
pub mod namespace;
pub mod types;
pub mod value;
pub mod view;
pub mod xml;

mod test_utils;

pub use crate::core::Uid;
pub use crate::descriptor::{FieldDescriptor, RecordDescriptor, XmlRecord};
pub use crate::namespace::Namespace;
pub use crate::value::{Numeric, Value, ValueType};
pub use crate::xml::{BindError, BindOptions, SerializeError};
