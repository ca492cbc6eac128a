//! Scalar value types and their XML lexical forms.
//!
//! Attribute and text values are coerced once, when a record's fields are
//! collected, so a record's `bind` only ever sees typed values.

use std::fmt;
use std::str::FromStr;

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    Text,
    /// Integer or float, decided by the literal's spelling.
    Numeric,
    /// A nested record bound from a child element.
    Record,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::Numeric => "numeric",
            ValueType::Record => "record",
        }
    }

    /// Whether values of this type are carried as text (attribute value or
    /// element content) rather than as a nested element.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ValueType::Record)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number that is either an integer or a float.
///
/// The variant is fixed by the literal: text containing a decimal point or an
/// exponent marker (or one of the special float spellings) is a float,
/// anything else must be a whole number.
///
/// ```rust
/// use xmile_bind::Numeric;
///
/// assert_eq!("10".parse::<Numeric>(), Ok(Numeric::Integer(10)));
/// assert_eq!("10.5".parse::<Numeric>(), Ok(Numeric::Float(10.5)));
/// assert_eq!("1e3".parse::<Numeric>(), Ok(Numeric::Float(1000.0)));
/// assert_eq!(Numeric::Float(10.0).to_string(), "10.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeric::Integer(value) => value as f64,
            Numeric::Float(value) => value,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Numeric::Integer(_))
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl FromStr for Numeric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_float_literal(s) {
            parse_float(s).map(Numeric::Float)
        } else {
            parse_integer(s).map(Numeric::Integer)
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Numeric::Integer(value) => write!(f, "{}", value),
            Numeric::Float(value) => {
                let text = format_float(value);
                // Keep a marker so the literal re-binds as a float.
                if value.is_finite() && !text.contains(['.', 'e', 'E']) {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

/// A coerced scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Numeric(Numeric),
}

impl Value {
    /// Coerces an XML literal to `value_type`.
    ///
    /// Returns the reason as text on failure; the caller attaches the element
    /// and field.
    pub fn parse(value_type: ValueType, literal: &str) -> Result<Self, String> {
        match value_type {
            ValueType::Boolean => parse_bool(literal).map(Value::Bool),
            ValueType::Integer => parse_integer(literal.trim()).map(Value::Integer),
            ValueType::Float => parse_float(literal.trim()).map(Value::Float),
            ValueType::Text => Ok(Value::Text(literal.to_string())),
            ValueType::Numeric => literal.parse().map(Value::Numeric),
            ValueType::Record => Err("a nested record has no scalar form".to_string()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Numeric(_) => ValueType::Numeric,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => f.write_str(if *value { "true" } else { "false" }),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => f.write_str(&format_float(*value)),
            Value::Text(value) => f.write_str(value),
            Value::Numeric(value) => write!(f, "{}", value),
        }
    }
}

fn is_float_literal(s: &str) -> bool {
    s.contains(['.', 'e', 'E']) || is_special_float(s)
}

fn is_special_float(s: &str) -> bool {
    matches!(
        s.trim_start_matches(['+', '-']).to_ascii_lowercase().as_str(),
        "inf" | "infinity" | "nan"
    )
}

fn parse_float(s: &str) -> Result<f64, String> {
    // XML Schema spellings first; Rust's parser does not accept "INF".
    match s {
        "INF" | "+INF" => return Ok(f64::INFINITY),
        "-INF" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }
    s.parse::<f64>()
        .map_err(|e| format!("{} (got '{}')", e, s))
}

fn parse_integer(s: &str) -> Result<i64, String> {
    s.parse::<i64>()
        .map_err(|e| format!("{} (got '{}')", e, s))
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("expected true/false (got '{}')", s)),
    }
}

/// Formats a float using the XML Schema spellings for non-finite values and
/// the shortest round-trip form otherwise.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        format!("{}", value)
    }
}
