//! Error types for binding and writing XMILE elements.

use std::fmt;

use thiserror::Error;

use crate::value::ValueType;

/// Errors that can occur while reading XML into records.
///
/// `element` fields hold the element path from the bound root, e.g.
/// `pie_input/plot[1]/scale`.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of XML")]
    UnexpectedEof,
    #[error("Malformed XML: {0}")]
    Malformed(String),
    #[error("Undeclared namespace prefix '{0}'")]
    UnknownPrefix(String),
    #[error("Unexpected element: expected {expected}, found {found}")]
    UnexpectedElement { expected: String, found: String },
    #[error("Schema violation in <{element}> field '{field}': {violation}")]
    SchemaViolation {
        element: String,
        field: String,
        violation: Violation,
    },
    #[error("Unknown child element <{child}> in <{element}>")]
    UnknownChildElement { element: String, child: String },
    #[error("Unknown attribute '{attribute}' on <{element}>")]
    UnknownAttribute { element: String, attribute: String },
    #[error("<{element}> declares no field '{field}'")]
    UndeclaredField { element: String, field: String },
    #[error("Field '{field}' of <{element}> is declared {declared} but was read as {requested}")]
    DescriptorMismatch {
        element: String,
        field: String,
        declared: ValueType,
        requested: ValueType,
    },
}

impl BindError {
    /// The offending field, for schema violations.
    pub fn field(&self) -> Option<&str> {
        match self {
            BindError::SchemaViolation { field, .. } | BindError::DescriptorMismatch { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, BindError::SchemaViolation { .. })
    }
}

/// How a field failed its declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required field has no value.
    MissingRequired,
    /// The literal could not be coerced to the declared type.
    InvalidValue {
        value: String,
        expected: ValueType,
        reason: String,
    },
    /// A single-valued element field matched more than one child.
    Duplicate { count: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingRequired => write!(f, "required value is missing"),
            Violation::InvalidValue {
                value,
                expected,
                reason,
            } => write!(f, "invalid {} value '{}': {}", expected, value, reason),
            Violation::Duplicate { count } => {
                write!(f, "expected at most one element, found {}", count)
            }
        }
    }
}

/// Errors that can occur while writing records as XML.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("<{element}> declares no field '{field}'")]
    UnknownField { element: String, field: String },
    #[error("Field '{field}' of <{element}> is declared {declared} but was given {given}")]
    DescriptorMismatch {
        element: String,
        field: String,
        declared: ValueType,
        given: ValueType,
    },
    #[error("Required field '{field}' of <{element}> has no value")]
    MissingRequired { element: String, field: String },
    #[error("No prefix bound for namespace '{0}'")]
    UnboundNamespace(String),
}
