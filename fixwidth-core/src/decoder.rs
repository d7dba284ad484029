//! Record decoding (lenient mode)
//!
//! Decode is a best-effort transform: field validation failures are reported
//! as diagnostics, unparsable values become [`Value::Null`](crate::types::Value),
//! and short input yields a partial record. Only empty input yields no record.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::field::FieldSchema;
use crate::record::Record;
use crate::schema::{Layout, RecordSchema};

#[cfg(feature = "logging")]
use tracing::{trace, warn};

/// Decode a raw fixed-width string
///
/// Returns `None` only for empty input.
pub fn decode_record(schema: &RecordSchema, raw: &str) -> Option<Record> {
    decode_with_diagnostics(schema, raw).map(|(record, _)| record)
}

/// Decode a raw fixed-width string and collect advisory diagnostics
///
/// Sequential schemas walk the record left to right; when the input ends
/// inside a field, whatever remains (trimmed) becomes that field's value and
/// decoding stops. Positional schemas visit every field at its declared
/// offset; a field starting past the end of the input takes its default.
pub fn decode_with_diagnostics(
    schema: &RecordSchema,
    raw: &str,
) -> Option<(Record, Vec<Diagnostic>)> {
    if raw.is_empty() {
        #[cfg(feature = "logging")]
        warn!("Empty record data provided for record type {}", schema.name());
        return None;
    }

    let available = raw.chars().count();
    let mut record = Record::new(schema.name());
    let mut sink = DiagnosticSink::default();

    match schema.layout() {
        Layout::Sequential => decode_sequential(schema, raw, available, &mut record, &mut sink),
        Layout::Positional { .. } => {
            decode_positional(schema, raw, available, &mut record, &mut sink)
        }
    }

    #[cfg(feature = "logging")]
    trace!(
        "Decoded {} of {} fields for record type {}",
        record.len(),
        schema.field_count(),
        schema.name()
    );

    Some((record, sink.into_vec()))
}

fn decode_sequential(
    schema: &RecordSchema,
    raw: &str,
    available: usize,
    record: &mut Record,
    sink: &mut DiagnosticSink,
) {
    for field in schema.fields() {
        if field.end() > available {
            sink.report(Diagnostic::ShortRecord {
                field: field.name().to_string(),
                expected: field.end(),
                actual: available,
            });

            if field.offset() < available {
                let rest = char_window(raw, field.offset(), available).trim();
                store(field, rest, record, sink);
            }
            break;
        }

        let window = char_window(raw, field.offset(), field.end());
        store(field, window, record, sink);
    }
}

fn decode_positional(
    schema: &RecordSchema,
    raw: &str,
    available: usize,
    record: &mut Record,
    sink: &mut DiagnosticSink,
) {
    for field in schema.fields() {
        if field.end() > available {
            sink.report(Diagnostic::ShortRecord {
                field: field.name().to_string(),
                expected: field.end(),
                actual: available,
            });
        }

        if field.offset() >= available {
            record.put(field.name(), field.default_or_null());
            continue;
        }

        let window = char_window(raw, field.offset(), field.end().min(available));
        store(field, window, record, sink);
    }
}

fn store(field: &FieldSchema, window: &str, record: &mut Record, sink: &mut DiagnosticSink) {
    if !field.validate(window) {
        sink.report(Diagnostic::FieldInvalid {
            field: field.name().to_string(),
            value: window.to_string(),
        });
    }
    record.put(field.name(), field.convert(window));
}

/// Slice `raw` by character positions `[start, end)`, clamped to its length
pub(crate) fn char_window(raw: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(raw, start);
    let to = byte_offset(raw, end).max(from);
    &raw[from..to]
}

fn byte_offset(raw: &str, chars: usize) -> usize {
    if raw.is_ascii() {
        return chars.min(raw.len());
    }
    raw.char_indices()
        .nth(chars)
        .map_or(raw.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, Value};

    fn record_1() -> RecordSchema {
        RecordSchema::sequential("record_1")
            .field(
                FieldSchema::new("id", 5)
                    .unwrap()
                    .with_type(FieldType::Integer)
                    .required(true),
            )
            .field(FieldSchema::new("name", 15).unwrap())
            .field(FieldSchema::new("email", 15).unwrap())
            .field(FieldSchema::new("status", 1).unwrap())
            .field(FieldSchema::new("amount", 9).unwrap().with_type(FieldType::Decimal))
            .build()
            .unwrap()
    }

    #[test]
    fn test_decode_full_record() {
        let raw = "00001John           john@exam.com  Y1234.5678";
        assert_eq!(raw.len(), 45);

        let record = decode_record(&record_1(), raw).unwrap();

        assert_eq!(record.record_type(), "record_1");
        assert_eq!(record.get("id"), Some(&Value::Integer(1)));
        assert_eq!(record.get("name"), Some(&Value::String("John".into())));
        assert_eq!(record.get("email"), Some(&Value::String("john@exam.com".into())));
        assert_eq!(record.get("status"), Some(&Value::String("Y".into())));
        assert_eq!(record.get("amount"), Some(&Value::Decimal(1234.5678)));
        assert_eq!(record.field_names(), vec!["id", "name", "email", "status", "amount"]);
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(decode_record(&record_1(), "").is_none());
    }

    #[test]
    fn test_short_record_is_partial() {
        let (record, diagnostics) = decode_with_diagnostics(&record_1(), "InvalidData").unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("id"), Some(&Value::Null));
        assert_eq!(record.as_string("name"), "idData");
        assert!(!record.has("email"));

        assert!(diagnostics.contains(&Diagnostic::FieldInvalid {
            field: "id".into(),
            value: "Inval".into()
        }));
        assert!(diagnostics.contains(&Diagnostic::ShortRecord {
            field: "name".into(),
            expected: 20,
            actual: 11
        }));
    }

    #[test]
    fn test_short_record_blank_tail_still_stored() {
        let record = decode_record(&record_1(), "00042     ").unwrap();
        assert_eq!(record.field_names(), vec!["id", "name"]);
        assert_eq!(record.as_int("id"), 42);
        assert_eq!(record.get("name"), Some(&Value::Null));
        assert!(!record.has("email"));
    }

    #[test]
    fn test_short_record_blank_tail_uses_default() {
        let schema = RecordSchema::sequential("r")
            .field(FieldSchema::new("id", 5).unwrap().with_type(FieldType::Integer))
            .field(FieldSchema::new("name", 15).unwrap().with_default("N/A"))
            .build()
            .unwrap();

        let record = decode_record(&schema, "00042     ").unwrap();
        assert_eq!(record.get("name"), Some(&Value::String("N/A".into())));
    }

    #[test]
    fn test_input_ending_on_field_boundary_stops() {
        let record = decode_record(&record_1(), "00042").unwrap();
        assert_eq!(record.field_names(), vec!["id"]);
    }

    #[test]
    fn test_invalid_field_still_decoded() {
        let raw = "ABCDEJohn           john@exam.com  Yxxxxxxxxx";
        let (record, diagnostics) = decode_with_diagnostics(&record_1(), raw).unwrap();

        assert_eq!(record.len(), 5);
        assert_eq!(record.get("id"), Some(&Value::Null));
        assert_eq!(record.get("amount"), Some(&Value::Null));
        assert_eq!(record.as_int("id"), 0);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_positional_out_of_range_uses_default() {
        let schema = RecordSchema::positional("person")
            .field_at(1, FieldSchema::new("first", 6).unwrap())
            .unwrap()
            .field_at(7, FieldSchema::new("last", 6).unwrap())
            .unwrap()
            .field_at(13, FieldSchema::new("email", 10).unwrap().with_default("n/a"))
            .unwrap()
            .build()
            .unwrap();

        let record = decode_record(&schema, "Shyam JoseR").unwrap();

        assert_eq!(record.as_string("first"), "Shyam");
        assert_eq!(record.as_string("last"), "JoseR");
        assert_eq!(record.as_string("email"), "n/a");
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_positional_blank_window_uses_default() {
        let schema = RecordSchema::positional("p")
            .field_at(1, FieldSchema::new("a", 3).unwrap())
            .unwrap()
            .field_at(4, FieldSchema::new("b", 3).unwrap().with_default("zzz"))
            .unwrap()
            .build()
            .unwrap();

        let record = decode_record(&schema, "abc   ").unwrap();
        assert_eq!(record.as_string("b"), "zzz");
    }

    #[test]
    fn test_positional_ignores_declaration_order() {
        let schema = RecordSchema::positional("p")
            .field_at(4, FieldSchema::new("second", 3).unwrap())
            .unwrap()
            .field_at(1, FieldSchema::new("first", 3).unwrap())
            .unwrap()
            .build()
            .unwrap();

        let record = decode_record(&schema, "abcdef").unwrap();
        assert_eq!(record.as_string("first"), "abc");
        assert_eq!(record.as_string("second"), "def");
        assert_eq!(record.field_names(), vec!["second", "first"]);
    }

    #[test]
    fn test_char_window_multibyte() {
        assert_eq!(char_window("añbc", 1, 3), "ñb");
        assert_eq!(char_window("abc", 2, 10), "c");
        assert_eq!(char_window("abc", 5, 10), "");
    }
}
