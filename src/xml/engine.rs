//! Descriptor-driven binding between [`Element`] trees and records.
//!
//! Binding happens in two steps. First the engine walks the element against
//! the record's descriptor table: every attribute and child is matched to a
//! field, scalar literals are coerced, and cardinality and required-ness are
//! checked. Only then does the record's [`XmlRecord::bind`] run, pulling typed
//! values out of [`BoundFields`]. A record is never built from a partially
//! valid element.
//!
//! Writing is the mirror image: [`XmlRecord::unbind`] hands values to a
//! [`FieldWriter`], which places each one according to its descriptor and
//! emits attributes and children in table order.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::descriptor::{
    Cardinality, FieldDescriptor, FieldKind, RecordDescriptor, XmlRecord, find_field,
};
use crate::types::WithWarnings;
use crate::value::{Numeric, Value, ValueType};
use crate::xml::errors::{BindError, SerializeError, Violation};
use crate::xml::node::{Element, QName};

/// What to do with a child element no field declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownChildPolicy {
    /// Skip it, logging at `debug` and recording a warning.
    #[default]
    Ignore,
    /// Fail with [`BindError::UnknownChildElement`].
    Reject,
}

/// What to do with an attribute no field declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAttributePolicy {
    #[default]
    Ignore,
    Reject,
}

/// Engine configuration. The default ignores unknown content, which lets
/// documents written by newer tools load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    pub unknown_children: UnknownChildPolicy,
    pub unknown_attributes: UnknownAttributePolicy,
}

impl BindOptions {
    /// Reject anything not declared.
    pub fn strict() -> Self {
        Self {
            unknown_children: UnknownChildPolicy::Reject,
            unknown_attributes: UnknownAttributePolicy::Reject,
        }
    }
}

/// Bind `element` as the root record `T`.
///
/// The element's local name must be `T::META.name`; its namespace must be
/// `T::META.namespace` or absent.
pub fn bind<T: XmlRecord>(element: &Element, options: &BindOptions) -> Result<T, BindError> {
    Binder::new(*options).bind_root(element)
}

/// Like [`bind`], also reporting every piece of content that was ignored.
pub fn bind_with_warnings<T: XmlRecord>(
    element: &Element,
    options: &BindOptions,
) -> Result<WithWarnings<T, String>, BindError> {
    let mut binder = Binder::new(*options);
    let record = binder.bind_root(element)?;
    if binder.warnings.is_empty() {
        Ok(WithWarnings::Ok(record))
    } else {
        Ok(WithWarnings::Warning(record, binder.warnings))
    }
}

/// Turn a record back into an element named after `T::META`.
pub fn unbind<T: XmlRecord>(record: &T) -> Result<Element, SerializeError> {
    let meta = T::META;
    unbind_as(record, QName::new(Some(meta.namespace), meta.name))
}

fn unbind_as<T: XmlRecord>(record: &T, name: QName) -> Result<Element, SerializeError> {
    let mut out = FieldWriter::new(T::META, T::FIELDS, name);
    record.unbind(&mut out)?;
    out.finish()
}

/// State shared by every record bound in one call.
struct Binder {
    options: BindOptions,
    warnings: Vec<String>,
}

impl Binder {
    fn new(options: BindOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
        }
    }

    fn bind_root<T: XmlRecord>(&mut self, element: &Element) -> Result<T, BindError> {
        let meta = T::META;
        let matches = element.name.local == meta.name
            && element
                .name
                .namespace
                .as_deref()
                .is_none_or(|ns| ns == meta.namespace);
        if !matches {
            return Err(BindError::UnexpectedElement {
                expected: QName::new(Some(meta.namespace), meta.name).to_string(),
                found: element.name.to_string(),
            });
        }
        self.bind_element(element, meta.name.to_string())
    }

    fn bind_element<T: XmlRecord>(&mut self, element: &Element, path: String) -> Result<T, BindError> {
        let mut fields = BoundFields::collect::<T>(element, path, self)?;
        let record = T::bind(&mut fields)?;
        trace!("bound <{}> at {}", T::META.name, fields.path);
        Ok(record)
    }

    fn unknown_child(&mut self, path: &str, child: &QName) -> Result<(), BindError> {
        match self.options.unknown_children {
            UnknownChildPolicy::Ignore => {
                debug!("ignoring unknown child <{}> of <{}>", child, path);
                self.warnings
                    .push(format!("ignored unknown child <{}> of <{}>", child, path));
                Ok(())
            }
            UnknownChildPolicy::Reject => Err(BindError::UnknownChildElement {
                element: path.to_string(),
                child: child.to_string(),
            }),
        }
    }

    fn unknown_attribute(&mut self, path: &str, attribute: &QName) -> Result<(), BindError> {
        match self.options.unknown_attributes {
            UnknownAttributePolicy::Ignore => {
                debug!("ignoring unknown attribute '{}' on <{}>", attribute, path);
                self.warnings
                    .push(format!("ignored unknown attribute '{}' on <{}>", attribute, path));
                Ok(())
            }
            UnknownAttributePolicy::Reject => Err(BindError::UnknownAttribute {
                element: path.to_string(),
                attribute: attribute.to_string(),
            }),
        }
    }
}

/// The validated, coerced field values of one element, ready for
/// [`XmlRecord::bind`].
///
/// Each getter takes its value out; asking for a field under a type other
/// than its declared one is a [`BindError::DescriptorMismatch`].
pub struct BoundFields<'a, 'b> {
    /// e.g. `pie_input/plot[0]`
    path: String,
    fields: &'static [FieldDescriptor],
    values: HashMap<&'static str, Value>,
    children: HashMap<&'static str, Vec<&'a Element>>,
    binder: &'b mut Binder,
}

impl<'a, 'b> BoundFields<'a, 'b> {
    fn collect<T: XmlRecord>(
        element: &'a Element,
        path: String,
        binder: &'b mut Binder,
    ) -> Result<Self, BindError> {
        let record = T::META;
        let fields = T::FIELDS;
        let mut values = HashMap::new();
        let mut children: HashMap<&'static str, Vec<&'a Element>> = HashMap::new();

        for (name, literal) in &element.attributes {
            let field = fields
                .iter()
                .find(|f| f.kind == FieldKind::Attribute && attribute_matches(f, name));
            match field {
                Some(field) => {
                    // Two prefixes bound to one URI can spell the same attribute twice.
                    if values.insert(field.name, coerce(&path, field, literal)?).is_some() {
                        return Err(schema_violation(&path, field, Violation::Duplicate { count: 2 }));
                    }
                }
                None => binder.unknown_attribute(&path, name)?,
            }
        }

        for child in &element.children {
            let field = fields
                .iter()
                .find(|f| f.kind == FieldKind::Element && child_matches(f, &record, &child.name));
            match field {
                Some(field) => children.entry(field.name).or_default().push(child),
                None => binder.unknown_child(&path, &child.name)?,
            }
        }

        for field in fields.iter().filter(|f| f.kind == FieldKind::Element) {
            let count = children.get(field.name).map_or(0, Vec::len);
            if field.cardinality == Cardinality::Single && count > 1 {
                return Err(schema_violation(&path, field, Violation::Duplicate { count }));
            }
            // Scalar elements bind their trimmed text content.
            if field.value_type.is_scalar() {
                if let Some(child) = children.remove(field.name).and_then(|c| c.into_iter().next()) {
                    values.insert(field.name, coerce(&path, field, child.text.trim())?);
                }
            }
        }

        for field in fields.iter().filter(|f| f.required) {
            let present = values.contains_key(field.name)
                || children.get(field.name).is_some_and(|c| !c.is_empty());
            if !present {
                return Err(schema_violation(&path, field, Violation::MissingRequired));
            }
        }

        Ok(Self {
            path,
            fields,
            values,
            children,
            binder,
        })
    }

    pub fn bool(&mut self, name: &str) -> Result<Option<bool>, BindError> {
        Ok(match self.take(name, ValueType::Boolean)? {
            Some(Value::Bool(v)) => Some(v),
            _ => None,
        })
    }

    pub fn integer(&mut self, name: &str) -> Result<Option<i64>, BindError> {
        Ok(match self.take(name, ValueType::Integer)? {
            Some(Value::Integer(v)) => Some(v),
            _ => None,
        })
    }

    /// An integer field narrowed to `N`; out-of-range values are invalid.
    pub fn integer_as<N>(&mut self, name: &str) -> Result<Option<N>, BindError>
    where
        N: TryFrom<i64>,
        N::Error: fmt::Display,
    {
        match self.integer(name)? {
            Some(v) => N::try_from(v)
                .map(Some)
                .map_err(|e| self.invalid(name, &v.to_string(), e.to_string())),
            None => Ok(None),
        }
    }

    pub fn float(&mut self, name: &str) -> Result<Option<f64>, BindError> {
        Ok(match self.take(name, ValueType::Float)? {
            Some(Value::Float(v)) => Some(v),
            _ => None,
        })
    }

    pub fn text(&mut self, name: &str) -> Result<Option<String>, BindError> {
        Ok(match self.take(name, ValueType::Text)? {
            Some(Value::Text(v)) => Some(v),
            _ => None,
        })
    }

    pub fn numeric(&mut self, name: &str) -> Result<Option<Numeric>, BindError> {
        Ok(match self.take(name, ValueType::Numeric)? {
            Some(Value::Numeric(v)) => Some(v),
            _ => None,
        })
    }

    /// A single nested record.
    pub fn record_field<R: XmlRecord>(&mut self, name: &str) -> Result<Option<R>, BindError> {
        self.descriptor(name, ValueType::Record)?;
        let Some(element) = self
            .children
            .remove(name)
            .and_then(|elements| elements.into_iter().next())
        else {
            return Ok(None);
        };
        let path = format!("{}/{}", self.path, name);
        self.binder.bind_element(element, path).map(Some)
    }

    /// Every nested record of a list field, in document order. No matching
    /// children yields an empty `Vec`.
    pub fn records<R: XmlRecord>(&mut self, name: &str) -> Result<Vec<R>, BindError> {
        self.descriptor(name, ValueType::Record)?;
        let elements = self.children.remove(name).unwrap_or_default();
        let mut records = Vec::with_capacity(elements.len());
        for (idx, element) in elements.into_iter().enumerate() {
            let path = format!("{}/{}[{}]", self.path, name, idx);
            records.push(self.binder.bind_element(element, path)?);
        }
        Ok(records)
    }

    /// Unwrap a required value. The engine has already checked presence, so
    /// this only fails if the record asks for a field it declared optional.
    pub fn require<V>(&self, name: &str, value: Option<V>) -> Result<V, BindError> {
        value.ok_or_else(|| self.missing(name))
    }

    pub fn missing(&self, name: &str) -> BindError {
        BindError::SchemaViolation {
            element: self.path.clone(),
            field: name.to_string(),
            violation: Violation::MissingRequired,
        }
    }

    /// A value that passed type coercion but is still unacceptable, e.g. an
    /// unknown keyword in a text field.
    pub fn invalid(&self, name: &str, value: &str, reason: impl Into<String>) -> BindError {
        let expected = find_field(self.fields, name).map_or(ValueType::Text, |(_, f)| f.value_type);
        BindError::SchemaViolation {
            element: self.path.clone(),
            field: name.to_string(),
            violation: Violation::InvalidValue {
                value: value.to_string(),
                expected,
                reason: reason.into(),
            },
        }
    }

    fn take(&mut self, name: &str, requested: ValueType) -> Result<Option<Value>, BindError> {
        let field = self.descriptor(name, requested)?;
        Ok(self.values.remove(field.name))
    }

    fn descriptor(
        &self,
        name: &str,
        requested: ValueType,
    ) -> Result<&'static FieldDescriptor, BindError> {
        match find_field(self.fields, name) {
            Some((_, field)) if field.value_type == requested => Ok(field),
            Some((_, field)) => Err(BindError::DescriptorMismatch {
                element: self.path.clone(),
                field: name.to_string(),
                declared: field.value_type,
                requested,
            }),
            None => Err(BindError::UndeclaredField {
                element: self.path.clone(),
                field: name.to_string(),
            }),
        }
    }
}

fn attribute_matches(field: &FieldDescriptor, name: &QName) -> bool {
    field.name == name.local && field.namespace == name.namespace.as_deref()
}

/// Children match by local name and resolved namespace. Unqualified children
/// (documents without namespace declarations) match by local name alone.
fn child_matches(field: &FieldDescriptor, record: &RecordDescriptor, name: &QName) -> bool {
    field.name == name.local
        && name
            .namespace
            .as_deref()
            .is_none_or(|ns| ns == field.resolved_namespace(record))
}

fn coerce(path: &str, field: &FieldDescriptor, literal: &str) -> Result<Value, BindError> {
    Value::parse(field.value_type, literal).map_err(|reason| {
        schema_violation(
            path,
            field,
            Violation::InvalidValue {
                value: literal.to_string(),
                expected: field.value_type,
                reason,
            },
        )
    })
}

fn schema_violation(path: &str, field: &FieldDescriptor, violation: Violation) -> BindError {
    BindError::SchemaViolation {
        element: path.to_string(),
        field: field.name.to_string(),
        violation,
    }
}

/// Collects a record's values during [`unbind`], one slot per descriptor.
pub struct FieldWriter {
    record: RecordDescriptor,
    fields: &'static [FieldDescriptor],
    name: QName,
    attributes: Vec<Option<(QName, String)>>,
    children: Vec<Vec<Element>>,
}

impl FieldWriter {
    fn new(record: RecordDescriptor, fields: &'static [FieldDescriptor], name: QName) -> Self {
        Self {
            record,
            fields,
            name,
            attributes: vec![None; fields.len()],
            children: vec![Vec::new(); fields.len()],
        }
    }

    pub fn bool(&mut self, name: &str, value: Option<bool>) -> Result<&mut Self, SerializeError> {
        self.scalar(name, ValueType::Boolean, value.map(Value::Bool))
    }

    pub fn integer(&mut self, name: &str, value: Option<i64>) -> Result<&mut Self, SerializeError> {
        self.scalar(name, ValueType::Integer, value.map(Value::Integer))
    }

    pub fn float(&mut self, name: &str, value: Option<f64>) -> Result<&mut Self, SerializeError> {
        self.scalar(name, ValueType::Float, value.map(Value::Float))
    }

    pub fn text(&mut self, name: &str, value: Option<&str>) -> Result<&mut Self, SerializeError> {
        self.scalar(name, ValueType::Text, value.map(|v| Value::Text(v.to_string())))
    }

    pub fn numeric(
        &mut self,
        name: &str,
        value: Option<Numeric>,
    ) -> Result<&mut Self, SerializeError> {
        self.scalar(name, ValueType::Numeric, value.map(Value::Numeric))
    }

    pub fn record_field<R: XmlRecord>(
        &mut self,
        name: &str,
        value: Option<&R>,
    ) -> Result<&mut Self, SerializeError> {
        let (idx, field) = self.lookup(name, ValueType::Record)?;
        if let Some(value) = value {
            self.children[idx] = vec![unbind_as(value, self.child_name(field))?];
        }
        Ok(self)
    }

    pub fn records<R: XmlRecord>(
        &mut self,
        name: &str,
        values: &[R],
    ) -> Result<&mut Self, SerializeError> {
        let (idx, field) = self.lookup(name, ValueType::Record)?;
        let child_name = self.child_name(field);
        self.children[idx] = values
            .iter()
            .map(|value| unbind_as(value, child_name.clone()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    fn scalar(
        &mut self,
        name: &str,
        value_type: ValueType,
        value: Option<Value>,
    ) -> Result<&mut Self, SerializeError> {
        let (idx, field) = self.lookup(name, value_type)?;
        let Some(value) = value else {
            return Ok(self);
        };
        match field.kind {
            FieldKind::Attribute => {
                let key = QName::new(field.namespace, field.name);
                self.attributes[idx] = Some((key, value.to_string()));
            }
            FieldKind::Element => {
                let mut child = Element::new(self.child_name(field));
                child.text = value.to_string();
                self.children[idx] = vec![child];
            }
        }
        Ok(self)
    }

    fn lookup(
        &self,
        name: &str,
        given: ValueType,
    ) -> Result<(usize, &'static FieldDescriptor), SerializeError> {
        let (idx, field) =
            find_field(self.fields, name).ok_or_else(|| SerializeError::UnknownField {
                element: self.name.local.clone(),
                field: name.to_string(),
            })?;
        if field.value_type != given {
            return Err(SerializeError::DescriptorMismatch {
                element: self.name.local.clone(),
                field: name.to_string(),
                declared: field.value_type,
                given,
            });
        }
        Ok((idx, field))
    }

    fn child_name(&self, field: &FieldDescriptor) -> QName {
        QName::new(Some(field.resolved_namespace(&self.record)), field.name)
    }

    fn finish(self) -> Result<Element, SerializeError> {
        for (idx, field) in self.fields.iter().enumerate() {
            let present = self.attributes[idx].is_some() || !self.children[idx].is_empty();
            if field.required && !present {
                return Err(SerializeError::MissingRequired {
                    element: self.name.local.clone(),
                    field: field.name.to_string(),
                });
            }
        }

        let mut element = Element::new(self.name);
        element.attributes = self.attributes.into_iter().flatten().collect();
        element.children = self.children.into_iter().flatten().collect();
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::check_table;
    use crate::test_utils::{ITEM_NS, SAMPLE_NS, Item, Sample, sample_element};

    #[test]
    fn test_sample_tables_are_well_formed() {
        assert!(check_table(&Sample::META, Sample::FIELDS).is_empty());
        assert!(check_table(&Item::META, Item::FIELDS).is_empty());
    }

    #[test]
    fn test_bind_collects_typed_values() {
        let element = sample_element(r#"name="s" size="10" flag="true""#, "<doc> notes </doc><item key=\"a\"/>");
        let sample: Sample = bind(&element, &BindOptions::default()).unwrap();
        assert_eq!(sample.name, "s");
        assert_eq!(sample.size, Some(Numeric::Integer(10)));
        assert_eq!(sample.flag, Some(true));
        assert_eq!(sample.doc.as_deref(), Some("notes"));
        assert_eq!(sample.items.len(), 1);
        assert_eq!(sample.items[0].key, "a");
    }

    #[test]
    fn test_missing_required_attribute() {
        let element = sample_element("", "");
        let err = bind::<Sample>(&element, &BindOptions::default()).unwrap_err();
        match err {
            BindError::SchemaViolation {
                element,
                field,
                violation,
            } => {
                assert_eq!(element, "sample");
                assert_eq!(field, "name");
                assert_eq!(violation, Violation::MissingRequired);
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_in_nested_record_reports_path() {
        let element = sample_element(r#"name="s""#, r#"<item key="a"/><item/>"#);
        let err = bind::<Sample>(&element, &BindOptions::default()).unwrap_err();
        match err {
            BindError::SchemaViolation { element, field, .. } => {
                assert_eq!(element, "sample/item[1]");
                assert_eq!(field, "key");
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_single_element() {
        let element = sample_element(r#"name="s""#, "<doc>a</doc><doc>b</doc>");
        let err = bind::<Sample>(&element, &BindOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            BindError::SchemaViolation {
                violation: Violation::Duplicate { count: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_content_policies() {
        let element = sample_element(r#"name="s" extra="1""#, "<mystery/>");

        let lenient = bind_with_warnings::<Sample>(&element, &BindOptions::default()).unwrap();
        assert!(lenient.is_warning());
        let (_, warnings): (Sample, Vec<String>) = lenient.into();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("mystery")));
        assert!(warnings.iter().any(|w| w.contains("extra")));

        let strict = BindOptions {
            unknown_children: UnknownChildPolicy::Reject,
            ..BindOptions::default()
        };
        let err = bind::<Sample>(&element, &strict).unwrap_err();
        assert!(matches!(err, BindError::UnknownChildElement { ref child, .. } if child.ends_with("mystery")));

        let err = bind::<Sample>(&element, &BindOptions::strict()).unwrap_err();
        assert!(matches!(err, BindError::UnknownAttribute { .. }));
    }

    #[test]
    fn test_wrong_root_element() {
        let element = Element::new(QName::new(Some(SAMPLE_NS), "other"));
        let err = bind::<Sample>(&element, &BindOptions::default()).unwrap_err();
        assert!(matches!(err, BindError::UnexpectedElement { .. }));
    }

    #[test]
    fn test_child_in_wrong_namespace_is_unknown() {
        let mut element = sample_element(r#"name="s""#, "");
        element
            .children
            .push(Element::new(QName::new(Some(SAMPLE_NS), "item")));
        let bound = bind_with_warnings::<Sample>(&element, &BindOptions::default()).unwrap();
        assert!(bound.is_warning());
        assert!(bound.unwrap().items.is_empty());
    }

    #[test]
    fn test_unbind_orders_by_table() {
        let sample = Sample {
            name: "s".to_string(),
            size: Some(Numeric::Float(2.0)),
            flag: None,
            doc: Some("d".to_string()),
            items: vec![
                Item {
                    key: "b".to_string(),
                },
                Item {
                    key: "a".to_string(),
                },
            ],
        };
        let element = unbind(&sample).unwrap();
        let keys: Vec<_> = element
            .attributes
            .iter()
            .map(|(name, value)| (name.local.as_str(), value.as_str()))
            .collect();
        assert_eq!(keys, vec![("name", "s"), ("size", "2.0")]);

        assert_eq!(element.children.len(), 3);
        assert!(element.children[0].name.is(Some(SAMPLE_NS), "doc"));
        assert!(element.children[1].name.is(Some(ITEM_NS), "item"));
        assert_eq!(element.children[1].attribute(None, "key"), Some("b"));
        assert_eq!(element.children[2].attribute(None, "key"), Some("a"));
    }

    #[test]
    fn test_unbind_then_bind_is_identity() {
        let sample = Sample {
            name: "s".to_string(),
            size: Some(Numeric::Integer(-4)),
            flag: Some(false),
            doc: None,
            items: Vec::new(),
        };
        let element = unbind(&sample).unwrap();
        let back: Sample = bind(&element, &BindOptions::strict()).unwrap();
        assert_eq!(back, sample);
    }
}
