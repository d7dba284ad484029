//! Field types and decoded values

use crate::constants::{BOOLEAN_TOKENS, BOOLEAN_TRUE_TOKENS};
use core::fmt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::warn;

/// Declared type of a field
///
/// Dates are carried as text; any format constraint comes from the field's
/// pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum FieldType {
    /// Free text
    #[default]
    String,
    /// Base-10 signed integer
    Integer,
    /// Base-10 floating point
    Decimal,
    /// One of the boolean tokens
    Boolean,
    /// Date kept as text
    Date,
}

impl FieldType {
    /// Look up a type by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "STRING" => Some(FieldType::String),
            "INTEGER" => Some(FieldType::Integer),
            "DECIMAL" => Some(FieldType::Decimal),
            "BOOLEAN" => Some(FieldType::Boolean),
            "DATE" => Some(FieldType::Date),
            _ => None,
        }
    }

    /// Canonical upper-case name
    pub const fn name(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Integer => "INTEGER",
            FieldType::Decimal => "DECIMAL",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
        }
    }

    /// Type-specific acceptance check on already-trimmed, non-blank text
    pub fn accepts(&self, trimmed: &str) -> bool {
        match self {
            FieldType::Integer => trimmed.parse::<i64>().is_ok(),
            FieldType::Decimal => trimmed.parse::<f64>().is_ok(),
            FieldType::Boolean => {
                let lowered = trimmed.to_ascii_lowercase();
                BOOLEAN_TOKENS.contains(&lowered.as_str())
            }
            FieldType::String | FieldType::Date => true,
        }
    }

    /// Convert non-blank text into a typed value
    ///
    /// `text` is what the field stores for String/Date; numeric and boolean
    /// parsing always works on the trimmed form. Unparsable numbers become
    /// [`Value::Null`].
    pub fn convert(&self, text: &str) -> Value {
        let trimmed = text.trim();
        match self {
            FieldType::Integer => trimmed.parse().map(Value::Integer).unwrap_or(Value::Null),
            FieldType::Decimal => trimmed.parse().map(Value::Decimal).unwrap_or(Value::Null),
            FieldType::Boolean => {
                let lowered = trimmed.to_ascii_lowercase();
                Value::Boolean(BOOLEAN_TRUE_TOKENS.contains(&lowered.as_str()))
            }
            FieldType::String | FieldType::Date => Value::String(text.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from_name(&name).unwrap_or_else(|| {
            #[cfg(feature = "logging")]
            warn!("Unknown field type '{}', falling back to STRING", name);
            FieldType::String
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent: blank without default, or unparsable
    #[default]
    Null,
    /// Text (String and Date fields, and defaults)
    String(String),
    /// Integer field
    Integer(i64),
    /// Decimal field
    Decimal(f64),
    /// Boolean field
    Boolean(bool),
}

impl Value {
    /// Check for the absent value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text written into a fixed-width window; Null renders as the empty string
    pub fn to_field_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
