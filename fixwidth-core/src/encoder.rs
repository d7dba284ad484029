//! Record encoding
//!
//! Every field is left-justified and space-padded to its width, cut from the
//! right when too wide, and written over a pad-filled buffer at its offset.

use crate::constants::PAD_CHAR;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::record::Record;
use crate::schema::{Layout, RecordSchema};
use crate::types::Value;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "logging")]
use tracing::trace;

/// Anything that can supply field text by name
///
/// Missing names encode as blank windows.
pub trait FieldSource {
    /// Text for the named field, if present
    fn field_text(&self, name: &str) -> Option<String>;
}

impl FieldSource for Record {
    fn field_text(&self, name: &str) -> Option<String> {
        self.get(name).map(Value::to_field_text)
    }
}

impl<S: FieldSource + ?Sized> FieldSource for &S {
    fn field_text(&self, name: &str) -> Option<String> {
        (**self).field_text(name)
    }
}

impl<V: AsRef<str>> FieldSource for HashMap<String, V> {
    fn field_text(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.as_ref().to_string())
    }
}

impl<V: AsRef<str>> FieldSource for BTreeMap<String, V> {
    fn field_text(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.as_ref().to_string())
    }
}

/// Encode values into a fixed-width line
pub fn encode_record<S: FieldSource + ?Sized>(schema: &RecordSchema, source: &S) -> String {
    encode_with_diagnostics(schema, source).0
}

/// Encode values into a fixed-width line and report lossy conditions
///
/// Truncation never fails the encode; it is reported as
/// [`Diagnostic::Truncated`]. With `trim_output` set on the schema, the
/// result may be shorter than the schema's total length.
pub fn encode_with_diagnostics<S: FieldSource + ?Sized>(
    schema: &RecordSchema,
    source: &S,
) -> (String, Vec<Diagnostic>) {
    let mut sink = DiagnosticSink::default();
    let mut buffer = vec![PAD_CHAR; schema.total_length()];
    let fixed_total = match schema.layout() {
        Layout::Positional { declared_total } => declared_total,
        Layout::Sequential => None,
    };

    for field in schema.fields() {
        let text = source.field_text(field.name()).unwrap_or_default();
        let formatted = format_field(&text, field.length(), field.name(), &mut sink);

        for (i, c) in formatted.chars().enumerate() {
            let pos = field.offset() + i;
            if let Some(total) = fixed_total {
                if pos >= total {
                    sink.report(Diagnostic::Clipped {
                        field: field.name().to_string(),
                        total_length: total,
                    });
                    break;
                }
            }
            if pos >= buffer.len() {
                buffer.resize(pos + 1, PAD_CHAR);
            }
            buffer[pos] = c;
        }

        #[cfg(feature = "logging")]
        trace!("Encoded field {}: '{}'", field.name(), formatted);
    }

    let mut output: String = buffer.into_iter().collect();

    if schema.trims_output() {
        let trimmed = output.trim();
        if trimmed.len() != output.len() {
            sink.report(Diagnostic::OutputTrimmed {
                from: output.chars().count(),
                to: trimmed.chars().count(),
            });
            output = trimmed.to_string();
        }
    }

    (output, sink.into_vec())
}

/// Left-justify `text` in `width` characters, truncating from the right
fn format_field(text: &str, width: usize, name: &str, sink: &mut DiagnosticSink) -> String {
    let actual = text.chars().count();
    if actual > width {
        sink.report(Diagnostic::Truncated {
            field: name.to_string(),
            width,
            actual,
        });
        return text.chars().take(width).collect();
    }

    let mut formatted = String::with_capacity(width);
    formatted.push_str(text);
    formatted.extend(core::iter::repeat(PAD_CHAR).take(width - actual));
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSchema;
    use crate::types::FieldType;

    fn schema() -> RecordSchema {
        RecordSchema::sequential("r")
            .field(FieldSchema::new("id", 5).unwrap().with_type(FieldType::Integer))
            .field(FieldSchema::new("name", 10).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_pads_fields() {
        let record = Record::new("r").with("id", 7i64).with("name", "Ann");
        let line = encode_record(&schema(), &record);

        assert_eq!(line, "7    Ann       ");
        assert_eq!(line.len(), 15);
    }

    #[test]
    fn test_encode_truncates_silently_but_reports() {
        let record = Record::new("r").with("name", "JohnSmithTooLongForTenChars");
        let (line, diagnostics) = encode_with_diagnostics(&schema(), &record);

        assert_eq!(&line[5..], "JohnSmithT");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::Truncated {
                field: "name".into(),
                width: 10,
                actual: 27
            }]
        );
    }

    #[test]
    fn test_missing_and_null_fields_are_blank() {
        let record = Record::new("r").with("id", Value::Null);
        assert_eq!(encode_record(&schema(), &record), " ".repeat(15));
    }

    #[test]
    fn test_encode_from_map() {
        let mut values = HashMap::new();
        values.insert("name".to_string(), "Bo");
        values.insert("id".to_string(), "12");
        assert_eq!(encode_record(&schema(), &values), "12   Bo        ");
    }

    #[test]
    fn test_positional_places_by_offset() {
        let schema = RecordSchema::positional("p")
            .field_at(6, FieldSchema::new("last", 5).unwrap())
            .unwrap()
            .field_at(1, FieldSchema::new("first", 5).unwrap())
            .unwrap()
            .build()
            .unwrap();

        let record = Record::new("p").with("first", "Ann").with("last", "Lee");
        assert_eq!(encode_record(&schema, &record), "Ann  Lee  ");
    }

    #[test]
    fn test_declared_total_clips_window() {
        let schema = RecordSchema::positional("p")
            .field_at(1, FieldSchema::new("a", 4).unwrap())
            .unwrap()
            .field_at(3, FieldSchema::new("b", 4).unwrap())
            .unwrap()
            .total_length(5)
            .build()
            .unwrap();

        let record = Record::new("p").with("a", "aaaa").with("b", "bbbb");
        let (line, diagnostics) = encode_with_diagnostics(&schema, &record);

        assert_eq!(line, "aabbb");
        assert!(matches!(diagnostics[0], Diagnostic::Clipped { .. }));
    }

    #[test]
    fn test_trim_output_shortens_line() {
        let schema = RecordSchema::sequential("r")
            .field(FieldSchema::new("a", 5).unwrap())
            .field(FieldSchema::new("b", 5).unwrap())
            .trim_output(true)
            .build()
            .unwrap();

        let record = Record::new("r").with("a", "x");
        let (line, diagnostics) = encode_with_diagnostics(&schema, &record);

        assert_eq!(line, "x");
        assert_eq!(diagnostics, vec![Diagnostic::OutputTrimmed { from: 10, to: 1 }]);
    }
}
