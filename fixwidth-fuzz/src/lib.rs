//! Fuzzing harness for fixwidth-core
//!
//! Each entry point takes arbitrary bytes and drives one codec path against a
//! fixed set of schemas. None of them may panic.
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Call these from a `fuzz_target!` body

use fixwidth_core::{
    decode_with_diagnostics, encode_with_diagnostics, validate_detailed, FieldSchema, FieldType,
    RecordSchema, SchemaDocument,
};
use std::collections::BTreeMap;

fn sequential() -> fixwidth_core::Result<RecordSchema> {
    RecordSchema::sequential("fuzz_seq")
        .field(
            FieldSchema::new("id", 5)?
                .with_type(FieldType::Integer)
                .required(true),
        )
        .field(FieldSchema::new("name", 7)?)
        .field(FieldSchema::new("flag", 1)?.with_type(FieldType::Boolean))
        .field(FieldSchema::new("amount", 6)?.with_type(FieldType::Decimal))
        .build()
}

/// Overlapping windows and one window reaching past the declared total
fn positional() -> fixwidth_core::Result<RecordSchema> {
    RecordSchema::positional("fuzz_pos")
        .total_length(12)
        .field_at(1, FieldSchema::new("code", 3)?.with_pattern("[A-Z]+")?)?
        .field_at(3, FieldSchema::new("overlap", 4)?.with_trim(false))?
        .field_at(10, FieldSchema::new("tail", 8)?.with_default("-"))?
        .build()
}

fn schemas() -> Vec<RecordSchema> {
    [sequential(), positional()].into_iter().flatten().collect()
}

/// Decode arbitrary text against every harness schema
pub fn fuzz_decode(data: &[u8]) {
    let raw = String::from_utf8_lossy(data);
    for schema in schemas() {
        // Should never panic
        let _ = decode_with_diagnostics(&schema, &raw);
    }
}

/// Run the strict gate on arbitrary text
pub fn fuzz_validate(data: &[u8]) {
    let raw = String::from_utf8_lossy(data);
    for schema in schemas() {
        let _ = validate_detailed(&schema, &raw);
    }
}

/// Encode arbitrary field values; the first byte picks how many fields get a value
pub fn fuzz_encode(data: &[u8]) {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);

    for schema in schemas() {
        let values: BTreeMap<String, String> = schema
            .fields()
            .iter()
            .take(selector as usize % (schema.field_count() + 1))
            .map(|field| (field.name().to_string(), text.to_string()))
            .collect();

        let (line, _) = encode_with_diagnostics(&schema, &values);
        if !schema.trims_output() {
            assert!(line.chars().count() >= schema.total_length());
        }
    }
}

/// Parse arbitrary text as a schema document
pub fn fuzz_schema_document(data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    if let Ok(document) = SchemaDocument::from_yaml_str(&text) {
        let _ = document.resolve();
    }
}
