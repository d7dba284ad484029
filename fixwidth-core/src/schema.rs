//! Record and source schemas
//!
//! Schemas are built once through [`SequentialBuilder`] or [`PositionalBuilder`]
//! and are immutable afterwards, so a single tree can be shared by any number
//! of concurrent decode/encode calls.

use crate::constants::DEFAULT_TRIM_OUTPUT;
use crate::error::SchemaError;
use crate::field::FieldSchema;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// How field offsets were derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Offsets are the running sum of preceding lengths
    Sequential,
    /// Offsets were declared per field
    Positional {
        /// Explicit total length, if declared
        declared_total: Option<usize>,
    },
}

/// What a positional schema does when two windows share characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Accept overlapping windows silently
    #[default]
    Allow,
    /// Accept them but log each overlap
    Warn,
    /// Fail the build with [`SchemaError::OverlappingFields`]
    Reject,
}

/// Ordered field list for one record type
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldSchema>,
    layout: Layout,
    total_length: usize,
    trim_output: bool,
}

impl RecordSchema {
    /// Start a schema whose offsets follow declaration order
    pub fn sequential(name: impl Into<String>) -> SequentialBuilder {
        SequentialBuilder {
            name: name.into(),
            fields: Vec::new(),
            cursor: 0,
            trim_output: DEFAULT_TRIM_OUTPUT,
        }
    }

    /// Start a schema whose fields declare 1-based positions
    pub fn positional(name: impl Into<String>) -> PositionalBuilder {
        PositionalBuilder {
            name: name.into(),
            fields: Vec::new(),
            declared_total: None,
            trim_output: DEFAULT_TRIM_OUTPUT,
            overlap: OverlapPolicy::default(),
        }
    }

    /// Record type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// First field with the given name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// How offsets were derived
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Check for a positional schema
    pub fn is_positional(&self) -> bool {
        matches!(self.layout, Layout::Positional { .. })
    }

    /// Expected length of a raw record in characters
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Whether encoded output is trimmed as a whole
    pub fn trims_output(&self) -> bool {
        self.trim_output
    }

    /// Raw record length must equal [`total_length`](Self::total_length) exactly
    pub fn has_valid_length(&self, raw: &str) -> bool {
        raw.chars().count() == self.total_length
    }
}

/// Builder for sequential schemas
#[derive(Debug)]
pub struct SequentialBuilder {
    name: String,
    fields: Vec<FieldSchema>,
    cursor: usize,
    trim_output: bool,
}

impl SequentialBuilder {
    /// Append a field; its offset is the sum of the lengths appended before it
    pub fn field(mut self, field: FieldSchema) -> Self {
        let length = field.length();
        self.fields.push(field.at_offset(self.cursor));
        self.cursor += length;
        self
    }

    /// Trim the whole encoded line
    pub fn trim_output(mut self, trim: bool) -> Self {
        self.trim_output = trim;
        self
    }

    /// Finish the schema
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        check_name(&self.name)?;
        warn_duplicates(&self.name, &self.fields);

        #[cfg(feature = "logging")]
        debug!(
            "Built sequential record type {} ({} fields, {} characters)",
            self.name,
            self.fields.len(),
            self.cursor
        );

        Ok(RecordSchema {
            name: self.name,
            fields: self.fields,
            layout: Layout::Sequential,
            total_length: self.cursor,
            trim_output: self.trim_output,
        })
    }
}

/// Builder for positional schemas
#[derive(Debug)]
pub struct PositionalBuilder {
    name: String,
    fields: Vec<FieldSchema>,
    declared_total: Option<usize>,
    trim_output: bool,
    overlap: OverlapPolicy,
}

impl PositionalBuilder {
    /// Place a field at a 1-based column
    pub fn field_at(mut self, position: usize, field: FieldSchema) -> Result<Self, SchemaError> {
        self.fields.push(field.at_position(position)?);
        Ok(self)
    }

    /// Declare the total record length instead of deriving it
    pub fn total_length(mut self, total: usize) -> Self {
        self.declared_total = Some(total);
        self
    }

    /// Trim the whole encoded line
    pub fn trim_output(mut self, trim: bool) -> Self {
        self.trim_output = trim;
        self
    }

    /// Choose how overlapping windows are handled
    pub fn overlap(mut self, policy: OverlapPolicy) -> Self {
        self.overlap = policy;
        self
    }

    /// Finish the schema
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        check_name(&self.name)?;
        warn_duplicates(&self.name, &self.fields);

        if self.overlap != OverlapPolicy::Allow {
            if let Some((first, second)) = find_overlap(&self.fields) {
                if self.overlap == OverlapPolicy::Reject {
                    return Err(SchemaError::OverlappingFields { first, second });
                }
                #[cfg(feature = "logging")]
                warn!(
                    "Record type {}: fields {} and {} overlap",
                    self.name, first, second
                );
            }
        }

        let derived = self.fields.iter().map(FieldSchema::end).max().unwrap_or(0);
        let total_length = self.declared_total.unwrap_or(derived);

        #[cfg(feature = "logging")]
        debug!(
            "Built positional record type {} ({} fields, {} characters)",
            self.name,
            self.fields.len(),
            total_length
        );

        Ok(RecordSchema {
            name: self.name,
            fields: self.fields,
            layout: Layout::Positional {
                declared_total: self.declared_total,
            },
            total_length,
            trim_output: self.trim_output,
        })
    }
}

fn check_name(name: &str) -> Result<(), SchemaError> {
    if name.trim().is_empty() {
        return Err(SchemaError::EmptyRecordTypeName);
    }
    Ok(())
}

fn warn_duplicates(record_type: &str, fields: &[FieldSchema]) {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name()) {
            #[cfg(feature = "logging")]
            warn!(
                "Record type {} declares field {} more than once; lookups use the first",
                record_type,
                field.name()
            );
            #[cfg(not(feature = "logging"))]
            let _ = record_type;
        }
    }
}

/// First pair of fields (in offset order) whose windows intersect
fn find_overlap(fields: &[FieldSchema]) -> Option<(String, String)> {
    let mut ordered: Vec<&FieldSchema> = fields.iter().collect();
    ordered.sort_by_key(|f| f.offset());

    let mut widest: Option<&FieldSchema> = None;
    for field in ordered {
        if let Some(prev) = widest {
            if field.offset() < prev.end() {
                return Some((prev.name().to_string(), field.name().to_string()));
            }
        }
        if widest.map_or(true, |prev| field.end() > prev.end()) {
            widest = Some(field);
        }
    }
    None
}

/// Named set of record types read from one source
#[derive(Debug, Clone)]
pub struct SourceSchema {
    name: String,
    max_size: usize,
    record_types: Vec<RecordSchema>,
    index: HashMap<String, usize>,
}

impl SourceSchema {
    /// Create an empty source
    ///
    /// `max_size` is informational; record lengths are never checked against it.
    pub fn new(name: impl Into<String>, max_size: usize) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptySourceName);
        }
        Ok(Self {
            name,
            max_size,
            record_types: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Register a record type; names must be unique within the source
    pub fn add_record_type(&mut self, schema: RecordSchema) -> Result<(), SchemaError> {
        if self.index.contains_key(schema.name()) {
            return Err(SchemaError::DuplicateRecordType {
                source_name: self.name.clone(),
                record_type: schema.name().to_string(),
            });
        }
        self.index
            .insert(schema.name().to_string(), self.record_types.len());
        self.record_types.push(schema);
        Ok(())
    }

    /// Chaining form of [`add_record_type`](Self::add_record_type)
    pub fn with_record_type(mut self, schema: RecordSchema) -> Result<Self, SchemaError> {
        self.add_record_type(schema)?;
        Ok(self)
    }

    /// Source name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Informational maximum record size
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Look up a record type
    pub fn record_type(&self, name: &str) -> Option<&RecordSchema> {
        self.index.get(name).map(|&i| &self.record_types[i])
    }

    /// Check for a record type
    pub fn has_record_type(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record types in insertion order
    pub fn record_types(&self) -> impl Iterator<Item = &RecordSchema> {
        self.record_types.iter()
    }

    /// Record type names in insertion order
    pub fn record_type_names(&self) -> Vec<&str> {
        self.record_types.iter().map(RecordSchema::name).collect()
    }

    /// Number of record types
    pub fn record_type_count(&self) -> usize {
        self.record_types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    fn field(name: &str, length: usize) -> FieldSchema {
        FieldSchema::new(name, length).unwrap()
    }

    #[test]
    fn test_sequential_offsets() {
        let schema = RecordSchema::sequential("record_1")
            .field(field("id", 5).with_type(FieldType::Integer))
            .field(field("name", 15))
            .field(field("email", 15))
            .field(field("status", 1))
            .field(field("amount", 9).with_type(FieldType::Decimal))
            .build()
            .unwrap();

        let offsets: Vec<_> = schema.fields().iter().map(FieldSchema::offset).collect();
        assert_eq!(offsets, vec![0, 5, 20, 35, 36]);
        assert_eq!(schema.total_length(), 45);
        assert_eq!(schema.layout(), Layout::Sequential);
    }

    #[test]
    fn test_positional_total_length() {
        let derived = RecordSchema::positional("p")
            .field_at(11, field("b", 5))
            .unwrap()
            .field_at(1, field("a", 10))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(derived.total_length(), 15);
        assert_eq!(derived.fields()[0].offset(), 10);

        let declared = RecordSchema::positional("p")
            .field_at(1, field("a", 10))
            .unwrap()
            .total_length(40)
            .build()
            .unwrap();
        assert_eq!(declared.total_length(), 40);
    }

    #[test]
    fn test_has_valid_length_is_exact() {
        let schema = RecordSchema::sequential("r")
            .field(field("a", 3))
            .build()
            .unwrap();
        assert!(schema.has_valid_length("abc"));
        assert!(!schema.has_valid_length("ab"));
        assert!(!schema.has_valid_length("abc "));
    }

    #[test]
    fn test_field_lookup_first_match_wins() {
        let schema = RecordSchema::sequential("r")
            .field(field("dup", 2))
            .field(field("dup", 4))
            .build()
            .unwrap();
        assert_eq!(schema.field("dup").unwrap().length(), 2);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_overlap_policies() {
        let build = |policy| {
            RecordSchema::positional("p")
                .field_at(1, field("a", 10))
                .unwrap()
                .field_at(5, field("b", 3))
                .unwrap()
                .overlap(policy)
                .build()
        };

        assert!(build(OverlapPolicy::Allow).is_ok());
        assert!(build(OverlapPolicy::Warn).is_ok());
        assert_eq!(
            build(OverlapPolicy::Reject).unwrap_err(),
            SchemaError::OverlappingFields {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        let schema = RecordSchema::positional("p")
            .field_at(1, field("a", 4))
            .unwrap()
            .field_at(5, field("b", 4))
            .unwrap()
            .overlap(OverlapPolicy::Reject)
            .build();
        assert!(schema.is_ok());
    }

    #[test]
    fn test_source_rejects_duplicate_record_types() {
        let schema = || RecordSchema::sequential("r").field(field("a", 1)).build().unwrap();
        let mut source = SourceSchema::new("s", 10).unwrap();
        source.add_record_type(schema()).unwrap();

        assert!(matches!(
            source.add_record_type(schema()),
            Err(SchemaError::DuplicateRecordType { .. })
        ));
        assert!(source.has_record_type("r"));
        assert_eq!(source.record_type_names(), vec!["r"]);
        assert_eq!(SourceSchema::new(" ", 0).unwrap_err(), SchemaError::EmptySourceName);
    }
}
