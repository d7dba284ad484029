//! Statically declared positional layouts
//!
//! A type describes its fixed-width shape once, as a `const` table of
//! [`FieldDescriptor`]s, and gets parse/serialize for free through a
//! [`LayoutRegistry`]. The registry turns each table into a positional
//! [`RecordSchema`] on first use and caches it per type.
//!
//! ```
//! use fixwidth_core::encoder::FieldSource;
//! use fixwidth_core::layout::{FieldDescriptor, FixedLayout, LayoutRegistry};
//! use fixwidth_core::record::Record;
//!
//! struct Person {
//!     first: String,
//!     last: String,
//! }
//!
//! impl FieldSource for Person {
//!     fn field_text(&self, name: &str) -> Option<String> {
//!         match name {
//!             "first" => Some(self.first.clone()),
//!             "last" => Some(self.last.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl FixedLayout for Person {
//!     const RECORD_NAME: &'static str = "person";
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::new("first", 1, 6),
//!         FieldDescriptor::new("last", 7, 6),
//!     ];
//!
//!     fn from_record(record: &Record) -> Self {
//!         Person {
//!             first: record.as_string("first"),
//!             last: record.as_string("last"),
//!         }
//!     }
//! }
//!
//! let layouts = LayoutRegistry::new();
//! let person: Person = layouts.parse("Ann   Lee   ").unwrap();
//! assert_eq!(person.last, "Lee");
//! assert_eq!(layouts.serialize(&person).unwrap(), "Ann   Lee   ");
//! ```

use crate::diagnostics::Diagnostic;
use crate::encoder::{encode_with_diagnostics, FieldSource};
use crate::error::SchemaError;
use crate::field::FieldSchema;
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::types::{FieldType, Value};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// One entry of a static layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: &'static str,
    /// 1-based start column
    pub position: usize,
    /// Window width
    pub length: usize,
    /// Trim before conversion
    pub trim: bool,
    /// Text used when the window is blank or starts past the input; empty means none
    pub default: &'static str,
    /// Declared type
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Trimmed String field without a default
    pub const fn new(name: &'static str, position: usize, length: usize) -> Self {
        Self {
            name,
            position,
            length,
            trim: true,
            default: "",
            field_type: FieldType::String,
        }
    }

    /// Keep surrounding whitespace
    pub const fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    /// Text used when the window is blank
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    /// Declared type
    pub const fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    fn to_field(self) -> Result<FieldSchema, SchemaError> {
        let field = FieldSchema::new(self.name, self.length)?
            .with_type(self.field_type)
            .with_trim(self.trim);
        Ok(if self.default.is_empty() {
            field
        } else {
            field.with_default(self.default)
        })
    }
}

/// A type with a statically declared fixed-width layout
pub trait FixedLayout: FieldSource + Sized + 'static {
    /// Record type name
    const RECORD_NAME: &'static str;

    /// Field table
    const FIELDS: &'static [FieldDescriptor];

    /// Explicit total length; derived from the table when `None`
    const TOTAL_LENGTH: Option<usize> = None;

    /// Trim the whole encoded line
    const TRIM_OUTPUT: bool = crate::constants::DEFAULT_TRIM_OUTPUT;

    /// Build a value from a decoded record
    fn from_record(record: &Record) -> Self;

    /// Build the positional schema for this layout
    fn schema() -> Result<RecordSchema, SchemaError> {
        let mut builder = RecordSchema::positional(Self::RECORD_NAME).trim_output(Self::TRIM_OUTPUT);
        if let Some(total) = Self::TOTAL_LENGTH {
            builder = builder.total_length(total);
        }
        for descriptor in Self::FIELDS {
            builder = builder.field_at(descriptor.position, descriptor.to_field()?)?;
        }
        builder.build()
    }
}

/// Per-type cache of layout schemas
///
/// Each type's schema is inserted once and never replaced; concurrent first
/// uses may both build it, but only the first insert is kept.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    cache: DashMap<TypeId, Arc<RecordSchema>>,
}

impl LayoutRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for `T`, built on first use
    pub fn schema_for<T: FixedLayout>(&self) -> Result<Arc<RecordSchema>, SchemaError> {
        let key = TypeId::of::<T>();
        if let Some(found) = self.cache.get(&key) {
            return Ok(Arc::clone(found.value()));
        }

        let schema = Arc::new(T::schema()?);

        #[cfg(feature = "logging")]
        debug!(
            "Cached layout {} ({} fields)",
            T::RECORD_NAME,
            schema.field_count()
        );

        let cached = self.cache.entry(key).or_insert(schema);
        Ok(Arc::clone(cached.value()))
    }

    /// Number of cached layouts
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Parse a raw line into `T`
    ///
    /// Empty input yields a value built from defaults.
    pub fn parse<T: FixedLayout>(&self, raw: &str) -> Result<T, SchemaError> {
        let schema = self.schema_for::<T>()?;

        #[cfg(feature = "logging")]
        trace!("Parsing {} characters into {}", raw.len(), T::RECORD_NAME);

        let record = crate::decoder::decode_record(&schema, raw).unwrap_or_else(|| {
            let mut record = Record::new(schema.name());
            for field in schema.fields() {
                record.put(field.name(), field.default_or_null());
            }
            record
        });
        Ok(T::from_record(&record))
    }

    /// Serialize `value` into a fixed-width line
    pub fn serialize<T: FixedLayout>(&self, value: &T) -> Result<String, SchemaError> {
        Ok(self.serialize_with_diagnostics(value)?.0)
    }

    /// Serialize `value` and report truncations
    pub fn serialize_with_diagnostics<T: FixedLayout>(
        &self,
        value: &T,
    ) -> Result<(String, Vec<Diagnostic>), SchemaError> {
        let schema = self.schema_for::<T>()?;
        Ok(encode_with_diagnostics(&schema, value))
    }

    /// Field values of `value` as a record, for JSON export
    pub fn to_record<T: FixedLayout>(&self, value: &T) -> Result<Record, SchemaError> {
        let schema = self.schema_for::<T>()?;
        let mut record = Record::new(schema.name());
        for field in schema.fields() {
            let text = value.field_text(field.name());
            record.put(field.name(), text.map_or(Value::Null, Value::String));
        }
        Ok(record)
    }
}
