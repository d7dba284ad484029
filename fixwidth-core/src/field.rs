//! Field schema: one named window of a fixed-width record

use crate::constants::{DEFAULT_TRIM, FIRST_POSITION};
use crate::error::SchemaError;
use crate::types::{FieldType, Value};
use regex::Regex;

/// Description of a single field
///
/// `offset` is zero-based. Sequential schemas assign it when the field is
/// appended; positional schemas derive it from a 1-based column.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    offset: usize,
    length: usize,
    field_type: FieldType,
    required: bool,
    pattern: Option<FieldPattern>,
    default: Option<String>,
    trim: bool,
}

/// A compiled validation pattern that must match the whole window
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    fn compile(field: &str, source: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            SchemaError::InvalidPattern {
                field: field.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern text as declared
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Full-match test
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl FieldSchema {
    /// Create a String field of the given length at offset 0
    pub fn new(name: impl Into<String>, length: usize) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if length == 0 {
            return Err(SchemaError::ZeroLength { field: name });
        }

        Ok(Self {
            name,
            offset: 0,
            length,
            field_type: FieldType::default(),
            required: false,
            pattern: None,
            default: None,
            trim: DEFAULT_TRIM,
        })
    }

    /// Set the declared type
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Mark the field as required (blank windows fail validation)
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach a validation pattern; it must match the whole extracted window
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, SchemaError> {
        self.pattern = if pattern.is_empty() {
            None
        } else {
            Some(FieldPattern::compile(&self.name, pattern)?)
        };
        Ok(self)
    }

    /// Text substituted when the window is blank
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether surrounding whitespace is stripped before conversion
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub(crate) fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub(crate) fn at_position(self, position: usize) -> Result<Self, SchemaError> {
        if position < FIRST_POSITION {
            return Err(SchemaError::InvalidPosition {
                field: self.name,
                position,
            });
        }
        Ok(self.at_offset(position - FIRST_POSITION))
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based start of the window
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// One-based start column
    pub fn position(&self) -> usize {
        self.offset + FIRST_POSITION
    }

    /// Window width in characters
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end of the window
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Declared type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether blank windows are rejected
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validation pattern, if any
    pub fn pattern(&self) -> Option<&FieldPattern> {
        self.pattern.as_ref()
    }

    /// Default text, if any
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Whether values are trimmed before conversion
    pub fn trims(&self) -> bool {
        self.trim
    }

    /// Check an extracted window against this field
    ///
    /// Blank input passes unless the field is required. Otherwise the pattern
    /// (if any) must match the untrimmed window, then the type check runs on
    /// the trimmed text.
    pub fn validate(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return !self.required;
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(raw) {
                return false;
            }
        }

        self.field_type.accepts(trimmed)
    }

    /// Convert an extracted window into a value
    ///
    /// Blank input yields the default as text (no coercion) or [`Value::Null`].
    /// Parse failures also yield [`Value::Null`].
    pub fn convert(&self, raw: &str) -> Value {
        if raw.trim().is_empty() {
            return self.default_or_null();
        }

        let text = if self.trim { raw.trim() } else { raw };
        self.field_type.convert(text)
    }

    pub(crate) fn default_or_null(&self) -> Value {
        self.default
            .as_ref()
            .map_or(Value::Null, |d| Value::String(d.clone()))
    }
}
