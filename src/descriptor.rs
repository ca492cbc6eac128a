//! Declarative field and record descriptors.
//!
//! A record type describes its XML shape once, as a `static` table of
//! [`FieldDescriptor`]s plus one [`RecordDescriptor`]. The engine in
//! [`crate::xml::engine`] consults the table to decide which attribute or
//! child element feeds which field, how its text is coerced, and whether its
//! absence is an error. Records never inspect XML themselves.
//!
//! ```rust
//! use xmile_bind::descriptor::{Cardinality, FieldDescriptor, FieldKind, RecordDescriptor};
//! use xmile_bind::namespace::{ISEE_NAMESPACE, XMILE_NAMESPACE};
//! use xmile_bind::ValueType;
//!
//! const RECORD: RecordDescriptor = RecordDescriptor::new("pie_input", ISEE_NAMESPACE);
//! const FLAG: FieldDescriptor =
//!     FieldDescriptor::attribute("transparent", ValueType::Boolean).in_namespace(ISEE_NAMESPACE);
//! const WIDTH: FieldDescriptor = FieldDescriptor::attribute("width", ValueType::Float);
//! const PLOTS: FieldDescriptor = FieldDescriptor::element("plot", ValueType::Record)
//!     .in_namespace(XMILE_NAMESPACE)
//!     .list();
//!
//! assert_eq!(FLAG.kind, FieldKind::Attribute);
//! assert_eq!(WIDTH.resolved_namespace(&RECORD), ISEE_NAMESPACE);
//! assert_eq!(PLOTS.cardinality, Cardinality::List);
//! assert_eq!(PLOTS.resolved_namespace(&RECORD), XMILE_NAMESPACE);
//! ```

use crate::namespace::Namespace;
use crate::value::ValueType;
use crate::xml::engine::{BoundFields, FieldWriter};
use crate::xml::errors::{BindError, SerializeError};

/// Where a field lives on the owning element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `name="value"` on the owning element's start tag.
    Attribute,
    /// A nested child element.
    Element,
}

/// Whether a field holds one value or an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    /// Every matching child element, in document order.
    List,
}

/// The binding rules for one field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Attribute or element local name.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Namespace URI override. `None` inherits the owning record's namespace.
    pub namespace: Option<&'static str>,
    pub required: bool,
    pub cardinality: Cardinality,
    pub value_type: ValueType,
}

impl FieldDescriptor {
    /// An optional, single-valued attribute in the record's namespace.
    pub const fn attribute(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            kind: FieldKind::Attribute,
            namespace: None,
            required: false,
            cardinality: Cardinality::Single,
            value_type,
        }
    }

    /// An optional, single-valued child element in the record's namespace.
    pub const fn element(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            kind: FieldKind::Element,
            namespace: None,
            required: false,
            cardinality: Cardinality::Single,
            value_type,
        }
    }

    pub const fn in_namespace(self, uri: &'static str) -> Self {
        Self {
            namespace: Some(uri),
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn list(self) -> Self {
        Self {
            cardinality: Cardinality::List,
            ..self
        }
    }

    /// The namespace this field binds in: its override, or the owning
    /// record's namespace.
    pub fn resolved_namespace<'a>(&'a self, record: &'a RecordDescriptor) -> &'a str {
        self.namespace.unwrap_or(record.namespace)
    }

    /// The override as a [`Namespace`], if any.
    pub fn namespace_override(&self) -> Option<Namespace> {
        self.namespace.map(Namespace::from_uri)
    }
}

/// The element name and default namespace of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub name: &'static str,
    pub namespace: &'static str,
}

impl RecordDescriptor {
    pub const fn new(name: &'static str, namespace: &'static str) -> Self {
        Self { name, namespace }
    }
}

/// A record type bound to an XML element through a descriptor table.
///
/// `bind` receives the already-collected and already-coerced field values;
/// `unbind` hands its values back field by field. Neither touches XML text.
pub trait XmlRecord: Sized {
    const META: RecordDescriptor;
    const FIELDS: &'static [FieldDescriptor];

    fn bind(fields: &mut BoundFields<'_, '_>) -> Result<Self, BindError>;

    fn unbind(&self, out: &mut FieldWriter) -> Result<(), SerializeError>;
}

/// Looks up a field by name.
pub fn find_field<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<(usize, &'a FieldDescriptor)> {
    fields.iter().enumerate().find(|(_, field)| field.name == name)
}

/// Checks the structural invariants of a descriptor table.
///
/// Returns every problem found, one message per problem.
pub fn check_table(record: &RecordDescriptor, fields: &[FieldDescriptor]) -> Vec<String> {
    let mut problems = Vec::new();

    for (idx, field) in fields.iter().enumerate() {
        if fields[..idx].iter().any(|earlier| earlier.name == field.name) {
            problems.push(format!("{}: duplicate field '{}'", record.name, field.name));
        }

        match field.kind {
            FieldKind::Attribute => {
                if field.cardinality == Cardinality::List {
                    problems.push(format!(
                        "{}: attribute '{}' cannot be a list",
                        record.name, field.name
                    ));
                }
                if !field.value_type.is_scalar() {
                    problems.push(format!(
                        "{}: attribute '{}' cannot hold a nested record",
                        record.name, field.name
                    ));
                }
            }
            FieldKind::Element => {
                if field.cardinality == Cardinality::List && field.value_type.is_scalar() {
                    problems.push(format!(
                        "{}: list element '{}' must hold records",
                        record.name, field.name
                    ));
                }
            }
        }
    }

    problems
}
