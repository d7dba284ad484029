//! Parser facade over a schema registry
//!
//! [`RecordParser`] resolves `(source, record type)` pairs against a shared
//! [`SchemaRegistry`] and hands the raw text to the decoder, encoder or
//! validator. Lookups that miss are logged and reported as `None`/`false`
//! rather than errors, so a batch keeps going past unknown types.

use crate::decoder;
use crate::diagnostics::Diagnostic;
use crate::encoder::{self, FieldSource};
use crate::error::{SchemaError, ValidationError};
use crate::record::Record;
use crate::registry::SchemaRegistry;
use crate::schema::RecordSchema;
use crate::validator;
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{error, warn};

/// Picks the record type of a raw line
///
/// Closures `FnMut(&str) -> Option<String>` implement this directly.
pub trait RecordTypeDetector {
    /// Record type for `line`, or `None` when it cannot be told
    fn detect_type(&mut self, line: &str) -> Option<String>;
}

impl<F> RecordTypeDetector for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn detect_type(&mut self, line: &str) -> Option<String> {
        self(line)
    }
}

/// Detector keyed on leading text
///
/// Prefixes are tried in the order they were added; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct PrefixDetector {
    rules: Vec<(String, String)>,
}

impl PrefixDetector {
    /// Create a detector with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Map lines starting with `prefix` to `record_type`
    pub fn with_prefix(mut self, prefix: impl Into<String>, record_type: impl Into<String>) -> Self {
        self.rules.push((prefix.into(), record_type.into()));
        self
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check for an empty rule set
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RecordTypeDetector for PrefixDetector {
    fn detect_type(&mut self, line: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, record_type)| record_type.clone())
    }
}

/// Decodes, encodes and validates records by source and record type
#[derive(Debug, Clone)]
pub struct RecordParser {
    registry: Arc<SchemaRegistry>,
}

impl RecordParser {
    /// Wrap a registry
    pub fn new(registry: SchemaRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Share an existing registry
    pub fn from_shared(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Load schemas from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaRegistry::from_yaml_str(content)?))
    }

    /// Load schemas from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaRegistry::from_yaml_file(path)?))
    }

    /// Underlying registry
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Look up a record schema
    pub fn schema(&self, source: &str, record_type: &str) -> Option<&RecordSchema> {
        let found = self.registry.record_type(source, record_type);
        if found.is_none() {
            #[cfg(feature = "logging")]
            error!(
                "Record type {} not found for source {}",
                record_type, source
            );
        }
        found
    }

    /// Decode one raw line
    ///
    /// `None` when the schema is unknown or the line is empty.
    pub fn decode(&self, source: &str, record_type: &str, raw: &str) -> Option<Record> {
        decoder::decode_record(self.schema(source, record_type)?, raw)
    }

    /// Decode one raw line and collect diagnostics
    pub fn decode_with_diagnostics(
        &self,
        source: &str,
        record_type: &str,
        raw: &str,
    ) -> Option<(Record, Vec<Diagnostic>)> {
        decoder::decode_with_diagnostics(self.schema(source, record_type)?, raw)
    }

    /// Decode a stream of lines sharing one record type
    ///
    /// Blank lines are skipped. Lines that fail to decode are logged with
    /// their 1-based line number and dropped.
    pub fn decode_all<'a, I>(
        &'a self,
        source: &'a str,
        record_type: &'a str,
        lines: I,
    ) -> impl Iterator<Item = Record> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter_map(move |(index, line)| {
                let line = line.as_ref();
                if line.trim().is_empty() {
                    return None;
                }
                let decoded = self.decode(source, record_type, line);
                if decoded.is_none() {
                    #[cfg(feature = "logging")]
                    warn!("Failed to decode line {}", index + 1);
                    #[cfg(not(feature = "logging"))]
                    let _ = index;
                }
                decoded
            })
    }

    /// Decode a stream of mixed lines, choosing each line's type with `detector`
    ///
    /// Lines the detector cannot classify are logged and skipped.
    pub fn decode_with_type_detection<'a, I, D>(
        &'a self,
        source: &'a str,
        lines: I,
        mut detector: D,
    ) -> impl Iterator<Item = Record> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: AsRef<str>,
        D: RecordTypeDetector + 'a,
    {
        lines
            .into_iter()
            .enumerate()
            .filter_map(move |(index, line)| {
                let line = line.as_ref();
                if line.trim().is_empty() {
                    return None;
                }
                match detector.detect_type(line) {
                    Some(record_type) => self.decode(source, &record_type, line),
                    None => {
                        #[cfg(feature = "logging")]
                        warn!("Could not detect record type for line {}", index + 1);
                        #[cfg(not(feature = "logging"))]
                        let _ = index;
                        None
                    }
                }
            })
    }

    /// Strict check of one raw line; `false` for unknown schemas
    pub fn validate(&self, source: &str, record_type: &str, raw: &str) -> bool {
        self.schema(source, record_type)
            .is_some_and(|schema| validator::validate_record(schema, raw))
    }

    /// Strict check of one raw line with the failure reason
    pub fn validate_detailed(
        &self,
        source: &str,
        record_type: &str,
        raw: &str,
    ) -> Result<(), ValidationError> {
        let schema =
            self.schema(source, record_type)
                .ok_or_else(|| ValidationError::UnknownRecordType {
                    source_name: source.to_string(),
                    record_type: record_type.to_string(),
                })?;
        validator::validate_detailed(schema, raw)
    }

    /// Encode values into a fixed-width line
    pub fn encode<S: FieldSource + ?Sized>(
        &self,
        source: &str,
        record_type: &str,
        values: &S,
    ) -> Option<String> {
        Some(encoder::encode_record(
            self.schema(source, record_type)?,
            values,
        ))
    }

    /// Encode a record using its own record type
    pub fn encode_record(&self, source: &str, record: &Record) -> Option<String> {
        self.encode(source, record.record_type(), record)
    }
}
