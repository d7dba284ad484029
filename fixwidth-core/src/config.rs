//! Schema description documents
//!
//! The on-disk tree is `sources → records → fields`. It is deserialized with
//! serde (YAML via `serde_yaml`) and then resolved into the immutable
//! [`SourceSchema`]/[`RecordSchema`] model. Resolution is strict: any bad
//! entry fails the whole document.
//!
//! ```yaml
//! sources:
//!   - source: source_1
//!     size: 45
//!     records:
//!       - type: record_1
//!         fields:
//!           - { name: id, length: 5, type: INTEGER, required: true }
//!           - { name: name, length: 15 }
//! ```
//!
//! A record is positional when its fields carry `position`; it then has to
//! be present on every field.

use crate::error::SchemaError;
use crate::field::FieldSchema;
use crate::schema::{OverlapPolicy, RecordSchema, SourceSchema};
use crate::types::FieldType;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Root of a schema description document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    /// Declared sources
    #[serde(default)]
    pub sources: Vec<SourceDefinition>,
}

/// One source entry
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Source name
    pub source: String,

    /// Informational maximum record size
    #[serde(default)]
    pub size: Option<Numeric>,

    /// Record types read from this source
    #[serde(default)]
    pub records: Vec<RecordDefinition>,
}

/// One record-type entry
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDefinition {
    /// Record type name
    #[serde(rename = "type")]
    pub name: String,

    /// Explicit total length (positional records only)
    #[serde(default)]
    pub total_length: Option<Numeric>,

    /// Trim the whole encoded line
    #[serde(default)]
    pub trim_output: Option<bool>,

    /// Overlap handling (positional records only)
    #[serde(default)]
    pub overlap: OverlapPolicy,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// One field entry
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Window width
    #[serde(default)]
    pub length: Option<Numeric>,

    /// Declared type; unknown names fall back to STRING
    #[serde(default, rename = "type")]
    pub field_type: FieldType,

    /// Reject blank windows
    #[serde(default)]
    pub required: Option<Flag>,

    /// Full-match validation pattern
    #[serde(default, alias = "pattern")]
    pub regex: Option<String>,

    /// Text used for blank windows
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,

    /// 1-based start column (positional records)
    #[serde(default)]
    pub position: Option<Numeric>,

    /// Trim before conversion
    #[serde(default)]
    pub trim: Option<bool>,
}

/// A number written either as a YAML integer or as numeric text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Plain integer
    Number(u64),
    /// Text such as `"40"`
    Text(String),
}

impl Numeric {
    fn resolve(&self, key: &str) -> Result<usize, SchemaError> {
        let invalid = || SchemaError::InvalidNumber {
            key: key.to_string(),
            value: match self {
                Numeric::Number(n) => n.to_string(),
                Numeric::Text(t) => t.clone(),
            },
        };
        match self {
            Numeric::Number(n) => usize::try_from(*n).map_err(|_| invalid()),
            Numeric::Text(t) => t.trim().parse().map_err(|_| invalid()),
        }
    }
}

/// A flag written either as a YAML boolean or as text
///
/// Text counts as true only when it reads "true" (any case).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    /// Plain boolean
    Bool(bool),
    /// Text such as `"true"`
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(t) => t.trim().eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(t) => t,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Decimal(d) => d.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl SchemaDocument {
    /// Parse a document from YAML text; blank text is an empty document
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        if content.trim().is_empty() {
            #[cfg(feature = "logging")]
            warn!("Schema document is empty");
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a document from a YAML stream
    pub fn from_yaml_reader<R: Read>(mut reader: R) -> Result<Self, SchemaError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_yaml_str(&content)
    }

    /// Resolve every source into schemas
    pub fn resolve(&self) -> Result<Vec<SourceSchema>, SchemaError> {
        self.sources.iter().map(SourceDefinition::resolve).collect()
    }
}

impl SourceDefinition {
    /// Resolve into a [`SourceSchema`]
    pub fn resolve(&self) -> Result<SourceSchema, SchemaError> {
        let size = match &self.size {
            Some(size) => size.resolve("size")?,
            None => 0,
        };

        let mut source = SourceSchema::new(self.source.clone(), size)?;
        for record in &self.records {
            source.add_record_type(record.resolve()?)?;
        }

        #[cfg(feature = "logging")]
        debug!(
            "Resolved source {} with {} record types",
            source.name(),
            source.record_type_count()
        );

        Ok(source)
    }
}

impl RecordDefinition {
    /// Check whether the fields declare explicit positions
    pub fn is_positional(&self) -> bool {
        self.fields.iter().any(|f| f.position.is_some())
    }

    /// Resolve into a [`RecordSchema`]
    pub fn resolve(&self) -> Result<RecordSchema, SchemaError> {
        let trim_output = self
            .trim_output
            .unwrap_or(crate::constants::DEFAULT_TRIM_OUTPUT);

        if !self.is_positional() {
            let mut builder = RecordSchema::sequential(self.name.clone()).trim_output(trim_output);
            for field in &self.fields {
                builder = builder.field(field.resolve()?);
            }
            return builder.build();
        }

        let mut builder = RecordSchema::positional(self.name.clone())
            .trim_output(trim_output)
            .overlap(self.overlap);
        if let Some(total) = &self.total_length {
            builder = builder.total_length(total.resolve("total_length")?);
        }
        for field in &self.fields {
            let position = field
                .position
                .as_ref()
                .ok_or_else(|| SchemaError::MissingPosition {
                    field: field.name.clone(),
                })?
                .resolve("position")?;
            builder = builder.field_at(position, field.resolve()?)?;
        }
        builder.build()
    }
}

impl FieldDefinition {
    /// Resolve into a [`FieldSchema`] (offset assigned by the record builder)
    pub fn resolve(&self) -> Result<FieldSchema, SchemaError> {
        let length = match &self.length {
            Some(length) => length.resolve("length")?,
            None => 0,
        };

        let mut field = FieldSchema::new(self.name.clone(), length)?
            .with_type(self.field_type)
            .required(self.required.as_ref().is_some_and(Flag::is_set));

        if let Some(regex) = &self.regex {
            field = field.with_pattern(regex)?;
        }
        if let Some(default) = &self.default {
            field = field.with_default(default.clone());
        }
        if let Some(trim) = self.trim {
            field = field.with_trim(trim);
        }
        Ok(field)
    }
}
